/// The collaborator contract consumed by the search engine.
///
/// A rules engine describes a concrete game: how states follow from one
/// another, when play stops, and how good a position looks without search.
/// The engine never mutates a state; every new state comes out of
/// [`Rules::successors`].
pub trait Rules {
    /// The game state (e.g., a board plus side to move)
    type State: Clone;

    /// Returns the initial game state
    fn initial_state(&self) -> Self::State;

    /// Returns every state reachable in one move, empty if there is none
    fn successors(&self, state: &Self::State) -> Vec<Self::State>;

    /// Returns true if the game has ended
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Static evaluation from the perspective of the player about to move.
    ///
    /// Decisive outcomes use the sentinels `f64::INFINITY` (the mover has
    /// won) and `f64::NEG_INFINITY` (the mover has lost); `0.0` is a draw.
    /// Returning NaN violates the contract and aborts the search.
    fn heuristic(&self, state: &Self::State) -> f64;
}
