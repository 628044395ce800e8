pub mod cab {
    pub mod cab;
}

pub mod config {
    pub mod config;
}

pub mod elevator_controller {
    pub mod controller;
    pub mod listener;
    pub mod requests;
    pub mod state;
}

pub mod input {
    pub mod console;
}
