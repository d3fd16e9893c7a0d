pub mod edit_buffer;
