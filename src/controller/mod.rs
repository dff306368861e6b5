pub mod run_controller;
