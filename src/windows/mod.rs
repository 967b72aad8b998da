pub mod main_window;
