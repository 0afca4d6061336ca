//! Tic-tac-toe, a solved game used to check searches end to end.
//!
//! Perfect play from the empty board is a draw, so a full-depth search
//! must never lose and two of them must always draw.

use gametree_core::Rules;
use std::fmt;

/// Rows, columns, then diagonals.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Heuristic weight of an open line by the number of pieces on it.
const LINE_WEIGHTS: [f64; 3] = [0.0, 1.0, 10.0];

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opposite(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Player::X => "X",
            Player::O => "O",
        })
    }
}

/// A move, as the index of the cell played.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TicTacToeAction(pub u8);

/// Board position, with cells indexed 0-8 row by row.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct TicTacToeState {
    board: [Option<Player>; 9],
    current: Player,
    // Set by `apply` so terminal checks stay cheap.
    winner: Option<Player>,
    last_move: Option<TicTacToeAction>,
}

impl TicTacToeState {
    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// The move that led here, if any.
    pub fn last_move(&self) -> Option<TicTacToeAction> {
        self.last_move
    }

    /// Piece on `cell`; out-of-range cells read as empty.
    pub fn get(&self, cell: usize) -> Option<Player> {
        self.board.get(cell).copied().flatten()
    }

    fn is_full(&self) -> bool {
        self.board.iter().all(Option::is_some)
    }

    fn line_owner(&self) -> Option<Player> {
        LINES.iter().find_map(|&[a, b, c]| {
            let player = self.board[a]?;
            (self.board[b] == Some(player) && self.board[c] == Some(player)).then_some(player)
        })
    }
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.board.chunks(3).enumerate() {
            if i > 0 {
                writeln!(f, "---+---+---")?;
            }
            let cells: Vec<String> = row
                .iter()
                .map(|cell| cell.map_or_else(|| "   ".to_string(), |p| format!(" {} ", p)))
                .collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

/// Tic-tac-toe rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct TicTacToe;

impl TicTacToe {
    /// Empty cells, or none once the game is over.
    pub fn legal_actions(&self, state: &TicTacToeState) -> Vec<TicTacToeAction> {
        if self.is_terminal(state) {
            return Vec::new();
        }
        (0..9u8)
            .filter(|&cell| state.board[cell as usize].is_none())
            .map(TicTacToeAction)
            .collect()
    }

    /// Place the mover's piece on `action` and pass the turn.
    pub fn apply(&self, state: &TicTacToeState, action: TicTacToeAction) -> TicTacToeState {
        let mut next = state.clone();
        next.board[action.0 as usize] = Some(state.current);
        next.current = state.current.opposite();
        next.winner = next.line_owner();
        next.last_move = Some(action);
        next
    }

    /// Plays a sequence of cells from the empty board.
    ///
    /// Returns `None` if any move is illegal at the point it is played.
    pub fn replay(&self, cells: &[u8]) -> Option<TicTacToeState> {
        cells.iter().try_fold(self.initial_state(), |state, &cell| {
            let action = TicTacToeAction(cell);
            self.legal_actions(&state)
                .contains(&action)
                .then(|| self.apply(&state, action))
        })
    }
}

impl Rules for TicTacToe {
    type State = TicTacToeState;

    fn initial_state(&self) -> Self::State {
        TicTacToeState {
            board: [None; 9],
            current: Player::X,
            winner: None,
            last_move: None,
        }
    }

    fn successors(&self, state: &Self::State) -> Vec<Self::State> {
        self.legal_actions(state)
            .into_iter()
            .map(|action| self.apply(state, action))
            .collect()
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        state.winner.is_some() || state.is_full()
    }

    /// Open-line count for the player to move minus the opponent's.
    ///
    /// A finished game is decisive: a winner on the board always made the
    /// last move, so the player to move has lost.
    fn heuristic(&self, state: &Self::State) -> f64 {
        if state.winner.is_some() {
            return f64::NEG_INFINITY;
        }
        if state.is_full() {
            return 0.0;
        }

        let me = state.current;
        let mut score = 0.0;
        for line in LINES {
            let mine = line.iter().filter(|&&c| state.board[c] == Some(me)).count();
            let theirs = line
                .iter()
                .filter(|&&c| state.board[c] == Some(me.opposite()))
                .count();
            if theirs == 0 {
                score += LINE_WEIGHTS[mine];
            } else if mine == 0 {
                score -= LINE_WEIGHTS[theirs];
            }
        }
        score
    }
}
