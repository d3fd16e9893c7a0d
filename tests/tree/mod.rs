mod added_folder_marks_everything_below;
mod create_file_opens_active_buffer;
mod modified_folder_does_not_mark_children;
mod rename_moves_open_buffers;
