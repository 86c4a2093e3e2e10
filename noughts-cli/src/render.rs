//! Terminal rendering of boards and session events

use noughts_core::{Board, Cell, EventSink, GameEvent, GameOutcome, Mark};

/// Draw the board with 1-9 in empty cells so they double as move keys
pub fn board_grid(board: &Board) -> String {
    let labels: Vec<String> = board
        .cells()
        .iter()
        .enumerate()
        .map(|(index, cell)| match cell {
            Cell::Taken(mark) => mark.to_string(),
            Cell::Empty => (index + 1).to_string(),
        })
        .collect();

    labels
        .chunks(3)
        .map(|row| format!(" {} \n", row.join(" | ")))
        .collect::<Vec<_>>()
        .join("---+---+---\n")
}

/// "1-2-3" style label for the line that decided the game
pub fn winning_line_label(board: &Board, outcome: GameOutcome) -> Option<String> {
    let line = board.winning_line(outcome.winner()?)?;
    let cells: Vec<String> = line.iter().map(|i| (i + 1).to_string()).collect();
    Some(cells.join("-"))
}

pub fn outcome_message(outcome: GameOutcome) -> String {
    match outcome {
        GameOutcome::Win(mark) => format!("{} wins!", mark),
        GameOutcome::Draw => "Draw!".to_string(),
        GameOutcome::InProgress => "In progress".to_string(),
    }
}

/// Prints session events as they arrive, keeping its own copy of the board
/// built only from `MoveApplied` events
pub struct TerminalRenderer {
    board: Board,
    human: Mark,
}

impl TerminalRenderer {
    pub fn new(human: Mark) -> Self {
        Self {
            board: Board::new(),
            human,
        }
    }
}

impl EventSink for TerminalRenderer {
    fn emit(&mut self, event: GameEvent) {
        match event {
            GameEvent::NewGame => {
                self.board = Board::new();
                println!("\nNew game. You are {}.", self.human);
                print!("{}", board_grid(&self.board));
            }
            GameEvent::MoveApplied { index, mark } => {
                if let Ok(next) = self.board.apply_move(index, mark) {
                    self.board = next;
                }
                let who = if mark == self.human { "You" } else { "Computer" };
                println!("\n{} played {} at {}", who, mark, index + 1);
                print!("{}", board_grid(&self.board));
            }
            GameEvent::TurnChanged(mark) => {
                if mark != self.human {
                    println!("Computer is thinking...");
                }
            }
            GameEvent::GameOver(outcome) => {
                println!("\n{}", outcome_message(outcome));
                if let Some(line) = winning_line_label(&self.board, outcome) {
                    println!("Winning line: {}", line);
                }
                println!("Type r to play again or q to quit.");
            }
        }
    }
}
