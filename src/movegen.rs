//! Legal move generation.
//!
//! Three phases are distinguished from the placement flags and the side to
//! move: Black's placement, White's placement, and normal play where the
//! terrain of the previous destination gates which pieces may move.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use tracing::{instrument, trace};

use crate::config::{Edge, RulesConfig, Sampling};
use crate::game::{BOARD_SIZE, Cell, GameState, Move, PIECES_PER_SIDE, Piece, Side};
use crate::terrain::terrain_of;

/// What kind of move a side is expected to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Placing the six pieces on the band along the given edge.
    Placement(Edge),
    /// Stepping pieces, or passing when nothing can move.
    Movement,
}

/// Set of cells as a bitmask over `Cell::index`.
type CellMask = u64;

/// Number of ordered arrangements of six pieces over `free` cells.
pub fn placement_count(free: usize) -> usize {
    if free < PIECES_PER_SIDE {
        return 0;
    }
    (free + 1 - PIECES_PER_SIDE..=free).product()
}

impl GameState {
    pub fn phase_for(&self, side: Side, config: &RulesConfig) -> Phase {
        match side {
            Side::Black if !self.black_placed => Phase::Placement(config.black_edge),
            Side::White if self.black_placed && !self.white_placed => {
                Phase::Placement(self.white_edge())
            }
            _ => Phase::Movement,
        }
    }

    /// White sets up opposite to wherever the black pieces stand.
    fn white_edge(&self) -> Edge {
        let black_on_top = Edge::Top.rows().iter().any(|&row| {
            (0..BOARD_SIZE).any(|col| {
                self.piece_at(Cell::new(col, row))
                    .is_some_and(|piece| piece.belongs_to(Side::Black))
            })
        });
        let black_edge = if black_on_top { Edge::Top } else { Edge::Bottom };
        black_edge.opposite()
    }

    /// Get all legal moves for `side` under the default rules configuration
    pub fn legal_moves(&self, side: Side) -> Vec<Move> {
        self.legal_moves_with(side, &RulesConfig::default())
    }

    /// Get all legal moves for `side`.
    ///
    /// The result holds no duplicates and has no meaningful order. During
    /// placement it is bounded by `config.placement_limit`; in normal play it
    /// is either the complete set of steps or exactly `[Move::Pass]`.
    #[instrument(level = "trace", skip(self, config))]
    pub fn legal_moves_with(&self, side: Side, config: &RulesConfig) -> Vec<Move> {
        let moves = match self.phase_for(side, config) {
            Phase::Placement(edge) => self.placements(edge, config),
            Phase::Movement => {
                let steps = self.steps(side);
                if steps.is_empty() {
                    vec![Move::Pass]
                } else {
                    steps
                }
            }
        };
        trace!(count = moves.len(), "generated legal moves");
        moves
    }

    /// Whether `mv` is legal for `side` under the default rules configuration
    pub fn is_legal(&self, mv: &Move, side: Side) -> bool {
        self.is_legal_with(mv, side, &RulesConfig::default())
    }

    /// Whether `mv` is legal for `side`, i.e. whether it is one of
    /// `legal_moves_with(side, config)`.
    ///
    /// Placements outside the configured cap or sample are not legal here;
    /// see `is_valid_placement` for the uncapped check.
    pub fn is_legal_with(&self, mv: &Move, side: Side, config: &RulesConfig) -> bool {
        match *mv {
            Move::Pass => self.legal_moves_with(side, config) == [Move::Pass],
            Move::Placement(cells) => match self.phase_for(side, config) {
                Phase::Placement(edge) => {
                    self.fits_band(&cells, edge) && self.is_selected_placement(mv, edge, config)
                }
                Phase::Movement => false,
            },
            Move::Step { from, to } => {
                if self.phase_for(side, config) != Phase::Movement {
                    return false;
                }
                match self.piece_at(from) {
                    Some(piece) if piece.belongs_to(side) && self.may_move_from(from) => {
                        self.destinations(from, piece) & (1 << to.index()) != 0
                    }
                    _ => false,
                }
            }
        }
    }

    /// Whether `side` may place its pieces on `cells` right now, ignoring
    /// the placement cap: six distinct empty cells of the side's band.
    pub fn is_valid_placement(
        &self,
        cells: &[Cell; PIECES_PER_SIDE],
        side: Side,
        config: &RulesConfig,
    ) -> bool {
        match self.phase_for(side, config) {
            Phase::Placement(edge) => self.fits_band(cells, edge),
            Phase::Movement => false,
        }
    }

    fn fits_band(&self, cells: &[Cell; PIECES_PER_SIDE], edge: Edge) -> bool {
        let mut seen: CellMask = 0;
        for cell in cells {
            let bit = 1 << cell.index();
            if seen & bit != 0 || !edge.contains_row(cell.row) || !self.is_empty(*cell) {
                return false;
            }
            seen |= bit;
        }
        true
    }

    /// Whether a placement that fits the band along `edge` survives the cap.
    fn is_selected_placement(&self, mv: &Move, edge: Edge, config: &RulesConfig) -> bool {
        let total = placement_count(self.free_band_cells(edge).len());
        match config.placement_limit {
            Some(limit) if limit < total => self.placements(edge, config).contains(mv),
            _ => true,
        }
    }

    /// Empty cells of the band along `edge`, row-major.
    fn free_band_cells(&self, edge: Edge) -> Vec<Cell> {
        edge.rows()
            .iter()
            .flat_map(|&row| (0..BOARD_SIZE).map(move |col| Cell::new(col, row)))
            .filter(|&cell| self.is_empty(cell))
            .collect()
    }

    fn placements(&self, edge: Edge, config: &RulesConfig) -> Vec<Move> {
        let cells = self.free_band_cells(edge);
        let total = placement_count(cells.len());
        if total == 0 {
            return Vec::new();
        }

        let limit = config.placement_limit.unwrap_or(usize::MAX);
        if limit < total {
            trace!(total, limit, "placement enumeration capped");
        }

        match config.placement_sampling {
            Sampling::Random { seed } if limit < total => sample_placements(&cells, limit, seed),
            _ => {
                let mut result = Vec::with_capacity(limit.min(total));
                let mut slots = [cells[0]; PIECES_PER_SIDE];
                enumerate_placements(&cells, 0, 0, &mut slots, limit, &mut result);
                result
            }
        }
    }

    /// Whether the terrain constraint lets a piece on `from` move at all.
    fn may_move_from(&self, from: Cell) -> bool {
        self.required_terrain()
            .is_none_or(|required| terrain_of(from) == required)
    }

    fn steps(&self, side: Side) -> Vec<Move> {
        let mut moves = Vec::new();
        for (from, piece) in self.pieces(side) {
            if !self.may_move_from(from) {
                continue;
            }
            let found = self.destinations(from, piece);
            moves.extend(
                Cell::all()
                    .filter(|to| found & (1 << to.index()) != 0)
                    .map(|to| Move::step(from, to)),
            );
        }
        moves
    }

    /// Every cell `piece` on `from` can end on, whatever path leads there.
    fn destinations(&self, from: Cell, piece: Piece) -> CellMask {
        let mut found = 0;
        self.walk(from, piece, terrain_of(from), 1 << from.index(), &mut found);
        found
    }

    fn walk(&self, at: Cell, mover: Piece, remaining: u8, visited: CellMask, found: &mut CellMask) {
        for next in at.neighbors() {
            let bit = 1 << next.index();
            if visited & bit != 0 {
                continue;
            }
            match (remaining, self.piece_at(next)) {
                (1, None) => *found |= bit,
                (1, Some(target)) if mover.can_capture(target) => *found |= bit,
                // Nothing can pass through an occupied cell
                (1, Some(_)) | (_, Some(_)) => {}
                (_, None) => self.walk(next, mover, remaining - 1, visited | bit, found),
            }
        }
    }
}

/// Ordered arrangements of six distinct cells, in lexicographic order of
/// their positions in `cells`, stopping at `limit`.
fn enumerate_placements(
    cells: &[Cell],
    depth: usize,
    used: u64,
    slots: &mut [Cell; PIECES_PER_SIDE],
    limit: usize,
    result: &mut Vec<Move>,
) {
    if depth == PIECES_PER_SIDE {
        result.push(Move::Placement(*slots));
        return;
    }
    for (i, &cell) in cells.iter().enumerate() {
        if result.len() >= limit {
            return;
        }
        if used & (1 << i) != 0 {
            continue;
        }
        slots[depth] = cell;
        enumerate_placements(cells, depth + 1, used | (1 << i), slots, limit, result);
    }
}

/// `limit` distinct arrangements drawn uniformly. Requires `limit` to be
/// below the number of possible arrangements.
fn sample_placements(cells: &[Cell], limit: usize, seed: u64) -> Vec<Move> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pool = cells.to_vec();
    let mut seen = HashSet::with_capacity(limit);
    let mut result = Vec::with_capacity(limit);

    while result.len() < limit {
        let (chosen, _) = pool.partial_shuffle(&mut rng, PIECES_PER_SIDE);
        let mut slots = [chosen[0]; PIECES_PER_SIDE];
        slots.copy_from_slice(chosen);
        if seen.insert(slots) {
            result.push(Move::Placement(slots));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn cell(s: &str) -> Cell {
        s.parse().unwrap()
    }

    fn mv(s: &str) -> Move {
        s.parse().unwrap()
    }

    /// Both sides marked as placed on an empty board.
    fn placed_board() -> GameState {
        let mut state = GameState::new();
        state.black_placed = true;
        state.white_placed = true;
        state
    }

    fn set_piece(state: &mut GameState, at: &str, piece: Piece) {
        state.set_piece(cell(at), Some(piece));
    }

    /// Destinations of the steps starting on `from`, row-major.
    fn destinations_from(moves: &[Move], from: &str) -> Vec<String> {
        let from = cell(from);
        let mut found: Vec<Cell> = moves
            .iter()
            .filter_map(|m| match m {
                Move::Step { from: f, to } if *f == from => Some(*to),
                _ => None,
            })
            .collect();
        found.sort_by_key(|c| c.index());
        found.iter().map(|c| c.to_string()).collect()
    }

    fn placement_cells(m: &Move) -> [Cell; PIECES_PER_SIDE] {
        match m {
            Move::Placement(cells) => *cells,
            other => panic!("expected a placement, got {}", other),
        }
    }

    #[test]
    fn test_placement_count() {
        assert_eq!(placement_count(5), 0);
        assert_eq!(placement_count(6), 720);
        assert_eq!(placement_count(7), 5040);
        assert_eq!(placement_count(12), 665_280);
    }

    #[test]
    fn test_black_opening_placements_stay_on_top_band() {
        let state = GameState::new();
        let moves = state.legal_moves(Side::Black);

        assert_eq!(moves.len(), 100, "reference rules cap placements at 100");
        for m in &moves {
            let cells = placement_cells(m);
            let distinct: BTreeSet<Cell> = cells.iter().copied().collect();
            assert_eq!(distinct.len(), 6, "{} reuses a cell", m);
            assert!(cells.iter().all(|c| c.row >= 4), "{} leaves the band", m);
            assert!(cells.iter().all(|&c| state.is_empty(c)));
        }

        let unique: HashSet<Move> = moves.iter().copied().collect();
        assert_eq!(unique.len(), moves.len());
    }

    #[test]
    fn test_first_placements_are_in_enumeration_order() {
        let moves = GameState::new().legal_moves(Side::Black);
        assert_eq!(moves[0], mv("A5/B5/C5/D5/E5/F5"));
        assert_eq!(moves[1], mv("A5/B5/C5/D5/E5/A6"));
    }

    #[test]
    fn test_white_cannot_place_before_black() {
        let moves = GameState::new().legal_moves(Side::White);
        assert_eq!(moves, vec![Move::Pass]);
    }

    #[test]
    fn test_white_places_opposite_black() {
        let state = GameState::new().apply(&mv("C6/A6/B5/D5/E6/F5"), Side::Black);
        assert_eq!(state.phase_for(Side::White, &RulesConfig::default()), Phase::Placement(Edge::Bottom));

        let moves = state.legal_moves(Side::White);
        assert_eq!(moves.len(), 100);
        for m in &moves {
            assert!(placement_cells(m).iter().all(|c| c.row <= 1), "{} leaves the band", m);
        }
    }

    #[test]
    fn test_black_on_bottom_edge_sends_white_to_top() {
        let config = RulesConfig {
            black_edge: Edge::Bottom,
            ..Default::default()
        };
        let black = GameState::new().legal_moves_with(Side::Black, &config);
        assert!(black.iter().all(|m| placement_cells(m).iter().all(|c| c.row <= 1)));

        let state = GameState::new().apply(&mv("C1/A1/B2/D2/E1/F2"), Side::Black);
        let white = state.legal_moves_with(Side::White, &config);
        assert!(!white.is_empty());
        assert!(white.iter().all(|m| placement_cells(m).iter().all(|c| c.row >= 4)));
    }

    /// Top band with only six free cells left, so the full set is small.
    fn six_free_cells() -> GameState {
        let mut state = GameState::new();
        for at in ["A5", "C5", "E5", "B6", "D6", "F6"] {
            set_piece(&mut state, at, Piece::WhitePaladin);
        }
        state
    }

    #[test]
    fn test_exhaustive_placements_over_six_cells() {
        let state = six_free_cells();
        let moves = state.legal_moves_with(Side::Black, &RulesConfig::exhaustive());
        assert_eq!(moves.len(), 720);
        for m in &moves {
            assert!(placement_cells(m).iter().all(|&c| state.is_empty(c)));
        }
    }

    #[test]
    fn test_paladins_are_distinguishable() {
        // Paladin orderings give distinct moves even though the boards look alike
        let state = six_free_cells();
        let moves = state.legal_moves_with(Side::Black, &RulesConfig::exhaustive());
        let unicorn = cell("B5");
        let same_board = moves
            .iter()
            .filter(|m| placement_cells(m)[0] == unicorn)
            .count();
        assert_eq!(same_board, 120);

        let boards: HashSet<GameState> = moves.iter().map(|m| state.apply(m, Side::Black)).collect();
        assert_eq!(boards.len(), 6, "one distinct board per unicorn cell");
    }

    #[test]
    fn test_capped_placements_are_a_prefix_of_the_full_set() {
        let state = six_free_cells();
        let all = state.legal_moves_with(Side::Black, &RulesConfig::exhaustive());
        let capped = state.legal_moves(Side::Black);
        assert_eq!(capped.len(), 100);
        assert_eq!(&all[..100], &capped[..]);
    }

    #[test]
    fn test_sampled_placements() {
        let config = RulesConfig {
            placement_limit: Some(50),
            placement_sampling: Sampling::Random { seed: 3 },
            ..Default::default()
        };
        let state = GameState::new();
        let sampled = state.legal_moves_with(Side::Black, &config);

        assert_eq!(sampled.len(), 50);
        let unique: HashSet<Move> = sampled.iter().copied().collect();
        assert_eq!(unique.len(), 50, "samples are distinct");
        assert!(sampled.iter().all(|m| state.is_legal_with(m, Side::Black, &config)));

        let again = state.legal_moves_with(Side::Black, &config);
        assert_eq!(sampled, again, "same seed, same sample");

        let first = state.legal_moves_with(
            Side::Black,
            &RulesConfig {
                placement_limit: Some(50),
                ..Default::default()
            },
        );
        assert_ne!(sampled, first);
    }

    #[test]
    fn test_sampling_above_total_returns_everything() {
        let config = RulesConfig {
            placement_limit: Some(10_000),
            placement_sampling: Sampling::Random { seed: 1 },
            ..Default::default()
        };
        let state = six_free_cells();
        let sampled: HashSet<Move> = state.legal_moves_with(Side::Black, &config).into_iter().collect();
        let all: HashSet<Move> = state
            .legal_moves_with(Side::Black, &RulesConfig::exhaustive())
            .into_iter()
            .collect();
        assert_eq!(sampled, all);
    }

    #[test]
    fn test_no_placement_when_band_is_too_full() {
        let mut state = six_free_cells();
        set_piece(&mut state, "A6", Piece::WhitePaladin);
        assert!(state.legal_moves(Side::Black).is_empty());
    }

    #[test]
    fn test_terrain_one_piece_moves_one_cell() {
        let mut state = placed_board();
        set_piece(&mut state, "A1", Piece::WhitePaladin);
        let moves = state.legal_moves(Side::White);
        assert_eq!(destinations_from(&moves, "A1"), vec!["B1", "A2"]);
    }

    #[test]
    fn test_terrain_two_piece_moves_exactly_two_cells() {
        let mut state = placed_board();
        set_piece(&mut state, "B1", Piece::WhitePaladin);
        let moves = state.legal_moves(Side::White);
        // A2 is reachable through A1 and through B2 but appears once
        assert_eq!(destinations_from(&moves, "B1"), vec!["D1", "A2", "C2", "B3"]);
        assert_eq!(moves.len(), 4);
    }

    #[test]
    fn test_paths_cannot_cross_pieces() {
        let mut state = placed_board();
        set_piece(&mut state, "B1", Piece::BlackPaladin);
        set_piece(&mut state, "B2", Piece::WhitePaladin);
        let moves = state.legal_moves(Side::Black);
        assert_eq!(destinations_from(&moves, "B1"), vec!["D1", "A2", "C2"]);
    }

    #[test]
    fn test_cannot_land_on_friend_or_enemy_paladin() {
        for blocker in [Piece::WhitePaladin, Piece::BlackPaladin, Piece::WhiteUnicorn] {
            let mut state = placed_board();
            set_piece(&mut state, "B1", Piece::WhitePaladin);
            set_piece(&mut state, "A2", blocker);
            let moves = state.legal_moves(Side::White);
            assert_eq!(
                destinations_from(&moves, "B1"),
                vec!["D1", "C2", "B3"],
                "A2 held by {:?}",
                blocker
            );
        }
    }

    #[test]
    fn test_paladin_may_capture_unicorn_but_unicorn_may_not() {
        let mut state = placed_board();
        set_piece(&mut state, "B1", Piece::WhitePaladin);
        set_piece(&mut state, "A2", Piece::BlackUnicorn);
        let moves = state.legal_moves(Side::White);
        assert_eq!(destinations_from(&moves, "B1"), vec!["D1", "A2", "C2", "B3"]);

        let mut state = placed_board();
        set_piece(&mut state, "B1", Piece::WhiteUnicorn);
        set_piece(&mut state, "A2", Piece::BlackUnicorn);
        let moves = state.legal_moves(Side::White);
        assert_eq!(destinations_from(&moves, "B1"), vec!["D1", "C2", "B3"]);
    }

    #[test]
    fn test_paladin_captures_unicorn_three_steps_away() {
        let mut state = placed_board();
        set_piece(&mut state, "A2", Piece::WhitePaladin);
        set_piece(&mut state, "F1", Piece::WhiteUnicorn);
        set_piece(&mut state, "A3", Piece::BlackUnicorn);

        let capture = Move::step(cell("A2"), cell("A3"));
        let moves = state.legal_moves(Side::White);
        assert!(moves.contains(&capture), "A2-B2-B3-A3 reaches the unicorn");
        assert!(state.is_legal(&capture, Side::White));

        let next = state.apply(&capture, Side::White);
        assert!(next.is_over());
        assert_eq!(next.winner(), Some(Side::White));
    }

    #[test]
    fn test_terrain_constraint_forces_pass() {
        let mut state = placed_board();
        set_piece(&mut state, "A2", Piece::WhitePaladin); // terrain 3
        set_piece(&mut state, "B1", Piece::WhitePaladin); // terrain 2
        set_piece(&mut state, "D1", Piece::WhiteUnicorn); // terrain 3
        set_piece(&mut state, "F6", Piece::BlackUnicorn);
        state.set_last_destination(Some(cell("A1"))); // terrain 1

        assert_eq!(state.legal_moves(Side::White), vec![Move::Pass]);
        assert!(state.is_legal(&Move::Pass, Side::White));
        assert!(!state.is_legal(&Move::step(cell("B1"), cell("B3")), Side::White));

        // After the pass the opponent's constraint is lifted for White's pieces too
        let unconstrained = state.apply(&Move::Pass, Side::White);
        assert!(unconstrained.legal_moves(Side::White).iter().all(|m| m.is_step()));
    }

    #[test]
    fn test_terrain_constraint_selects_origins() {
        let mut state = GameState::new();
        state.apply_in_place(&mv("C6/A6/B5/D5/E6/F5"), Side::Black);
        state.apply_in_place(&mv("C1/A1/B2/D2/E1/F2"), Side::White);
        state.apply_in_place(&mv("A1-A2"), Side::White);

        let required = state.required_terrain();
        assert_eq!(required, Some(3));
        let moves = state.legal_moves(Side::Black);
        assert!(!moves.is_empty());
        for m in &moves {
            match m {
                Move::Step { from, .. } => assert_eq!(terrain_of(*from), 3, "{} ignores the constraint", m),
                other => panic!("unexpected {}", other),
            }
        }
    }

    #[test]
    fn test_side_without_pieces_passes() {
        let state = placed_board();
        assert_eq!(state.legal_moves(Side::Black), vec![Move::Pass]);
    }

    #[test]
    fn test_pass_not_legal_when_steps_exist() {
        let mut state = placed_board();
        set_piece(&mut state, "A1", Piece::WhitePaladin);
        assert!(!state.is_legal(&Move::Pass, Side::White));
    }

    #[test]
    fn test_is_legal_placement_means_membership() {
        let opened = GameState::new().apply(&mv("C6/A6/B5/D5/E6/F5"), Side::Black);
        let configs = [
            RulesConfig::default(),
            RulesConfig::exhaustive(),
            RulesConfig {
                placement_limit: Some(40),
                placement_sampling: Sampling::Random { seed: 9 },
                ..Default::default()
            },
        ];
        let candidates = [
            (GameState::new(), Side::Black, mv("C6/A6/B5/D5/E6/F5")),
            (GameState::new(), Side::Black, mv("A5/B5/C5/D5/E5/F5")),
            (opened, Side::White, mv("C1/A1/B2/D2/E1/F2")),
            (opened, Side::White, mv("A1/B1/C1/D1/E1/F1")),
        ];
        for config in &configs {
            for (state, side, placement) in &candidates {
                let generated = state.legal_moves_with(*side, config);
                assert_eq!(
                    state.is_legal_with(placement, *side, config),
                    generated.contains(placement),
                    "{} under {:?}",
                    placement,
                    config
                );
            }
            let (state, side, _) = &candidates[0];
            for m in state.legal_moves_with(*side, config) {
                assert!(state.is_legal_with(&m, *side, config), "{} generated but not legal", m);
            }
        }

        // Outside the default cap, still allowed by the rules
        let state = GameState::new();
        let placement = mv("C6/A6/B5/D5/E6/F5");
        assert!(!state.is_legal(&placement, Side::Black));
        let cells = placement_cells(&placement);
        assert!(state.is_valid_placement(&cells, Side::Black, &RulesConfig::default()));
        assert!(state.is_legal_with(&placement, Side::Black, &RulesConfig::exhaustive()));
    }

    #[test]
    fn test_invalid_placements_are_rejected() {
        let config = RulesConfig::default();
        let exhaustive = RulesConfig::exhaustive();
        let state = GameState::new();
        let valid = |state: &GameState, m: &str, side: Side| {
            state.is_valid_placement(&placement_cells(&mv(m)), side, &config)
        };

        assert!(!valid(&state, "C4/A6/B5/D5/E6/F5", Side::Black), "C4 is off the band");
        let twice = Move::Placement(["C6", "C6", "B5", "D5", "E6", "F5"].map(cell));
        assert!(!state.is_valid_placement(&placement_cells(&twice), Side::Black, &config));
        assert!(!state.is_legal_with(&twice, Side::Black, &exhaustive), "C6 twice");
        assert!(!valid(&state, "C6/A6/B5/D5/E6/F5", Side::White), "White places second");

        let placed = state.apply(&mv("C6/A6/B5/D5/E6/F5"), Side::Black);
        assert!(!valid(&placed, "C6/A6/B5/D5/E6/F5", Side::Black), "already placed");
        assert!(!valid(&placed, "C1/A6/B2/D2/E1/F2", Side::White), "A6 is taken");
        assert!(!placed.is_legal_with(&mv("C1/A6/B2/D2/E1/F2"), Side::White, &exhaustive));
        assert!(valid(&placed, "C1/A1/B2/D2/E1/F2", Side::White));
        assert!(placed.is_legal_with(&mv("C1/A1/B2/D2/E1/F2"), Side::White, &exhaustive));
    }

    #[test]
    fn test_white_edge_is_opposite_black() {
        let config = RulesConfig::default();
        let top = GameState::new().apply(&mv("C6/A6/B5/D5/E6/F5"), Side::Black);
        assert_eq!(top.phase_for(Side::White, &config), Phase::Placement(Edge::Top.opposite()));
        let bottom = GameState::new().apply(&mv("C1/A1/B2/D2/E1/F2"), Side::Black);
        assert_eq!(bottom.phase_for(Side::White, &config), Phase::Placement(Edge::Bottom.opposite()));
    }

    #[test]
    fn test_is_legal_matches_generated_steps() {
        let mut state = GameState::new();
        state.apply_in_place(&mv("C6/A6/B5/D5/E6/F5"), Side::Black);
        state.apply_in_place(&mv("C1/A1/B2/D2/E1/F2"), Side::White);

        let moves: HashSet<Move> = state.legal_moves(Side::White).into_iter().collect();
        for from in Cell::all() {
            for to in Cell::all() {
                if from == to {
                    continue;
                }
                let step = Move::step(from, to);
                assert_eq!(
                    state.is_legal(&step, Side::White),
                    moves.contains(&step),
                    "disagreement on {}",
                    step
                );
            }
        }
        assert!(!state.is_legal(&mv("A1-A2"), Side::Black), "not Black's piece");
    }
}
