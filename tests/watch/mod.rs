mod external_change_reloads_the_tree;
mod ui_events_are_served_until_the_ui_leaves;
