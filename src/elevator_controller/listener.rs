use num2words::Num2Words;

/// Elevator state change listener. Purely observational; the controller
/// never reads anything back from it.
pub trait ElevatorListener {
    /// Called when the car is at a floor, including the starting floor.
    fn at_floor(&self, floor: u8);

    /// Called when the door starts to open.
    fn door_opening(&self);

    /// Called when the door is closed again.
    fn door_closed(&self);
}

/// Null-object used when no listener is set.
#[derive(Debug, Default)]
pub struct NoopListener;

impl ElevatorListener for NoopListener {
    fn at_floor(&self, _floor: u8) {}

    fn door_opening(&self) {}

    fn door_closed(&self) {}
}

/// Prints every event to stdout, spelling the floor number out in words.
#[derive(Debug, Default)]
pub struct LoggingListener;

impl ElevatorListener for LoggingListener {
    fn at_floor(&self, floor: u8) {
        let floor_words = Num2Words::new(floor as u32)
            .to_words()
            .unwrap_or_else(|_| floor.to_string());
        println!("Elevator at floor: {}", floor_words);
    }

    fn door_opening(&self) {
        println!("Door is opening...");
    }

    fn door_closed(&self) {
        println!("Door is closed.");
    }
}
