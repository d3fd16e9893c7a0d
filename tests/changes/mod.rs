mod added_folder_commits_as_directory_path;
mod commit_all_publishes_in_diff_order;
mod commit_then_diff_is_clean;
mod empty_change_set_skips_the_archive;
mod refresh_failure_after_commit_keeps_the_commit;
mod rejected_commit_leaves_session_untouched;
mod revert_restores_latest_content;
