use std::thread;
use std::time::Duration;

use crossbeam_channel as cbc;

use crate::cab::cab::Cab;
use crate::config::config::Config;
use crate::elevator_controller::listener::{ElevatorListener, NoopListener};
use crate::elevator_controller::requests::{ButtonPress, ElevatorControls, Origin, PendingRequests};
use crate::elevator_controller::state::{Direction, ElevatorState};

/// Owns the controller worker thread. Button presses flow in through
/// [`ElevatorControls`] handles; everything else (state, position, pending
/// requests) lives on the worker and is never shared.
pub struct ElevatorController {
    controls: ElevatorControls,
    stop_tx: cbc::Sender<()>,
    worker: Option<Worker>,
    worker_handle: Option<thread::JoinHandle<()>>,
}

impl ElevatorController {
    pub fn new(cab: Box<dyn Cab + Send>, config: Config) -> Self {
        let (request_tx, request_rx) = cbc::unbounded::<ButtonPress>();
        let (stop_tx, stop_rx) = cbc::bounded::<()>(1);

        ElevatorController {
            controls: ElevatorControls::new(request_tx, config.floors_count),
            stop_tx,
            worker: Some(Worker {
                cab,
                listener: Box::new(NoopListener),
                request_rx,
                stop_rx,
                pending: PendingRequests::new(),
                current_floor: config.initial_floor,
                floors_count: config.floors_count,
                floor_travel: config.floor_travel_duration(),
                door_open_close: config.door_open_close_duration(),
            }),
            worker_handle: None,
        }
    }

    /// Replaces the listener. Has no effect once the worker is running.
    pub fn set_listener(&mut self, listener: Box<dyn ElevatorListener + Send>) {
        if let Some(worker) = self.worker.as_mut() {
            worker.listener = listener;
        }
    }

    /// Intake handle for producers. Clone freely.
    pub fn controls(&self) -> ElevatorControls {
        self.controls.clone()
    }

    pub fn start(&mut self) {
        if let Some(worker) = self.worker.take() {
            let handle = thread::Builder::new()
                .name("elevator-controller".to_string())
                .spawn(move || worker.run())
                .expect("failed to spawn the controller thread");
            self.worker_handle = Some(handle);
        }
    }

    /// Signals the worker to finish its current wait and exit, then joins
    /// it. Idempotent; returns once the worker is gone.
    pub fn stop(&mut self) {
        let _ = self.stop_tx.try_send(());
        if let Some(handle) = self.worker_handle.take() {
            let _ = handle.join();
        }
    }
}

struct Worker {
    cab: Box<dyn Cab + Send>,
    listener: Box<dyn ElevatorListener + Send>,
    request_rx: cbc::Receiver<ButtonPress>,
    stop_rx: cbc::Receiver<()>,
    pending: PendingRequests,
    current_floor: u8,
    floors_count: u8,
    floor_travel: Duration,
    door_open_close: Duration,
}

impl Worker {
    fn run(mut self) {
        self.listener.at_floor(self.current_floor);

        let mut state = ElevatorState::Idle;
        loop {
            let next = match state {
                ElevatorState::Idle => self.wait_for_requests(),
                ElevatorState::SelectDirection => self.select_direction(),
                ElevatorState::MoveUp => self.sweep(Direction::Up),
                ElevatorState::MoveDown => self.sweep(Direction::Down),
            };
            state = match next {
                Some(next) => next,
                None => break,
            };
        }
        println!("You have successfully exited the simulator...");
    }

    /// The only wait tied to external input: blocks until a press arrives.
    /// Returns `None` on the stop signal or when every intake handle is
    /// gone.
    fn wait_for_requests(&mut self) -> Option<ElevatorState> {
        cbc::select! {
            recv(self.request_rx) -> press => {
                match press {
                    Ok(press) => {
                        self.pending.collect(press);
                        self.collect_requests();
                        Some(ElevatorState::SelectDirection)
                    }
                    Err(_) => None,
                }
            },
            recv(self.stop_rx) -> _ => None,
        }
    }

    /// Drains everything queued so far into the pending sets. Idempotent,
    /// safe to call at any point between waits.
    fn collect_requests(&mut self) {
        while let Ok(press) = self.request_rx.try_recv() {
            self.pending.collect(press);
        }
    }

    /// Inside requests strictly before outside ones; within an origin the
    /// earliest press decides. A request for the floor we are already on is
    /// serviced on the spot, clearing that floor for both origins.
    fn select_direction(&mut self) -> Option<ElevatorState> {
        let origin = if self.pending.has(Origin::Inside) {
            Origin::Inside
        } else {
            Origin::Outside
        };
        let target = match self.pending.earliest(origin) {
            Some(press) => press.floor,
            None => return Some(ElevatorState::Idle),
        };

        if target == self.current_floor {
            self.pending.clear_floor(target);
            self.open_door()?;
            Some(ElevatorState::SelectDirection)
        } else if target < self.current_floor {
            Some(ElevatorState::MoveDown)
        } else {
            Some(ElevatorState::MoveUp)
        }
    }

    /// One directional sweep. The boundary is recomputed every floor so
    /// requests arriving mid-sweep can extend or shrink it without
    /// restarting the traversal.
    fn sweep(&mut self, direction: Direction) -> Option<ElevatorState> {
        self.drive(direction);
        while self.floors_ahead(direction) {
            self.wait(self.floor_travel)?;
            self.current_floor = match direction {
                Direction::Up => self.current_floor + 1,
                Direction::Down => self.current_floor - 1,
            };
            self.listener.at_floor(self.current_floor);
            self.collect_requests();
            if self.pending.contains(self.current_floor) {
                self.cab.stop();
                self.pending.clear_floor(self.current_floor);
                self.open_door()?;
                if self.floors_ahead(direction) {
                    self.drive(direction);
                }
            }
        }
        if self.pending.is_empty() {
            Some(ElevatorState::Idle)
        } else {
            Some(ElevatorState::SelectDirection)
        }
    }

    /// Whether any pending request lies beyond the current floor in the
    /// sweep direction. An empty set never constrains the sweep: the
    /// defaults make the comparison fail immediately.
    fn floors_ahead(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.current_floor < self.pending.highest_floor(1),
            Direction::Down => self.current_floor > self.pending.lowest_floor(self.floors_count),
        }
    }

    fn drive(&self, direction: Direction) {
        match direction {
            Direction::Up => self.cab.move_up(),
            Direction::Down => self.cab.move_down(),
        }
    }

    fn open_door(&self) -> Option<()> {
        self.listener.door_opening();
        self.cab.operate_door();
        self.wait(self.door_open_close)?;
        self.listener.door_closed();
        Some(())
    }

    /// Simulated fixed-duration delay. `None` when the stop signal cuts it
    /// short; no physical action may follow that.
    fn wait(&self, duration: Duration) -> Option<()> {
        cbc::select! {
            recv(self.stop_rx) -> _ => None,
            recv(cbc::after(duration)) -> _ => Some(()),
        }
    }
}
