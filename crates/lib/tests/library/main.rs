mod common;
mod event_loop_tests;
mod persistence_tests;
