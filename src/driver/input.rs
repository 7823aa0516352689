use log::warn;
use std::io::BufRead;
use std::sync::mpsc;

use crate::driver::realtime::DriverMessage;

/// Parses one line of user input. Floors may be separated by commas or
/// whitespace, so several people can call at once: `3, 7 2`.
/// `q`, `quit` and `exit` stop the simulation.
pub fn parse_line(line: &str) -> Vec<Result<DriverMessage, String>> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => return vec![Ok(DriverMessage::Quit)],
        _ => {}
    }
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<usize>()
                .map(DriverMessage::Call)
                .map_err(|_| format!("\"{}\" is not a floor number", item))
        })
        .collect()
}

/// Forwards calls read from `reader` until it ends or the user quits.
pub fn read_calls<R: BufRead>(reader: R, tx: mpsc::Sender<DriverMessage>) {
    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!("Could not read input: {}", e);
                break;
            }
        };
        for parsed in parse_line(&line) {
            match parsed {
                Ok(DriverMessage::Quit) => {
                    let _ = tx.send(DriverMessage::Quit);
                    return;
                }
                Ok(msg) => {
                    if tx.send(msg).is_err() {
                        return;
                    }
                }
                Err(e) => warn!("{}", e),
            }
        }
    }
    let _ = tx.send(DriverMessage::InputClosed);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_reads_several_floors_on_one_line() {
        assert_eq!(
            parse_line(" 3, 7 2 "),
            vec![
                Ok(DriverMessage::Call(3)),
                Ok(DriverMessage::Call(7)),
                Ok(DriverMessage::Call(2))
            ]
        );
    }

    #[test]
    fn it_reports_garbage_without_dropping_the_rest() {
        let parsed = parse_line("4,up,-1");
        assert_eq!(parsed[0], Ok(DriverMessage::Call(4)));
        assert!(parsed[1].is_err());
        assert!(parsed[2].is_err());
    }

    #[test]
    fn it_quits_on_request() {
        assert_eq!(parse_line("Q"), vec![Ok(DriverMessage::Quit)]);
        assert!(parse_line("   ").is_empty());
    }

    #[test]
    fn it_signals_end_of_input() {
        let (tx, rx) = mpsc::channel();
        read_calls("1\n\n5,x\n".as_bytes(), tx);
        let got: Vec<DriverMessage> = rx.try_iter().collect();
        assert_eq!(
            got,
            vec![DriverMessage::Call(1), DriverMessage::Call(5), DriverMessage::InputClosed]
        );
    }

    #[test]
    fn it_stops_reading_after_quit() {
        let (tx, rx) = mpsc::channel();
        read_calls("1\nquit\n2\n".as_bytes(), tx);
        let got: Vec<DriverMessage> = rx.try_iter().collect();
        assert_eq!(got, vec![DriverMessage::Call(1), DriverMessage::Quit]);
    }
}
