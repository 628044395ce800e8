use elevator_sim::cab::cab::SimCab;
use elevator_sim::config::config::Config;
use elevator_sim::elevator_controller::controller::ElevatorController;
use elevator_sim::elevator_controller::listener::LoggingListener;
use elevator_sim::input::console;

use std::io;

fn main() {
    let config = Config::from_args();
    println!("{:?}", config);

    let mut controller = ElevatorController::new(Box::new(SimCab), config);
    controller.set_listener(Box::new(LoggingListener));
    controller.start();

    let controls = controller.controls();
    console::consume_input(&controls, io::stdin().lock());

    controller.stop();
}
