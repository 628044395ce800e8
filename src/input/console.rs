use std::io::BufRead;

use crate::elevator_controller::requests::ElevatorControls;

/// Reads whitespace-separated tokens until EOF or `quit`/`exit`. A bare
/// number is an outside call, a bracketed number an inside one; everything
/// the controller rejects is printed and the loop goes on.
pub fn consume_input<R: BufRead>(controls: &ElevatorControls, source: R) {
    show_welcome_message(controls.floors_count());

    for line in source.lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => return,
        };
        for token in line.split_whitespace() {
            if is_exit(token) {
                return;
            }
            consume(controls, token);
        }
    }
}

fn consume(controls: &ElevatorControls, token: &str) {
    let result = if let Some(digits) = bracketed_digits(token) {
        controls.press_inside(parse_floor(digits))
    } else if is_digits(token) {
        controls.press_outside(parse_floor(token))
    } else {
        show_try_again_message(token);
        return;
    };

    if let Err(invalid) = result {
        println!("{}", invalid);
    }
}

fn bracketed_digits(token: &str) -> Option<&str> {
    token
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .filter(|digits| is_digits(digits))
}

fn is_digits(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

// Overflowing numbers become floor 0, which no building has; the range
// check rejects them like any other bad floor.
fn parse_floor(digits: &str) -> u8 {
    digits.parse::<u8>().unwrap_or(0)
}

fn is_exit(token: &str) -> bool {
    token.eq_ignore_ascii_case("quit") || token.eq_ignore_ascii_case("exit")
}

fn show_welcome_message(floors_count: u8) {
    println!("Please enter a floor number from 1 to {}", floors_count);
    println!("Elevator call from a floor");
    println!(" - enter the floor number: 1 or 2 or 3 ...");
    println!("Floor selection inside the elevator");
    println!(" - enter the floor number in square brackets: [1] or [2] or [3] ...");
    println!("Exit");
    println!(" - enter quit or exit to leave the simulator");
}

fn show_try_again_message(token: &str) {
    println!("Input '{}' does not exist, please try again...", token);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elevator_controller::requests::Origin;
    use crossbeam_channel as cbc;

    #[test]
    fn routes_tokens_to_the_right_origin() {
        let (request_tx, request_rx) = cbc::unbounded();
        let controls = ElevatorControls::new(request_tx, 7);

        let input = &b"3 [5]\nbogus 99 [nope]\nquit 4\n"[..];
        consume_input(&controls, input);

        let presses: Vec<(Origin, u8)> = request_rx
            .try_iter()
            .map(|press| (press.origin, press.floor))
            .collect();
        assert_eq!(presses, vec![(Origin::Outside, 3), (Origin::Inside, 5)]);
    }

    #[test]
    fn stops_at_end_of_input() {
        let (request_tx, request_rx) = cbc::unbounded();
        let controls = ElevatorControls::new(request_tx, 7);

        consume_input(&controls, &b"[2]"[..]);

        assert_eq!(request_rx.try_iter().count(), 1);
    }
}
