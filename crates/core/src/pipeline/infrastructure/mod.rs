pub mod progress_simulator;
