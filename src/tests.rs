#[cfg(test)]
mod tests {
    use crate::builder::{BoardBuilder, BuilderInvalidReason, ParseBoardError};
    use crate::connectivity::{component_count, is_fully_connected};
    use crate::ledger::BridgeLedger;
    use crate::legality::{can_add_bridge, can_remove_bridge, IllegalMove};
    use crate::location::{Dimension, Location};
    use crate::propagate::Propagator;
    use crate::solver::{BacktrackingSolver, SolverConfig, SolverFailure};
    use crate::steps::{Step, StepLog};
    use crate::{Board, BridgeCount, Direction, Orientation, Puzzle};

    // solvable by forced moves alone
    const FORCED: &str = "7,7
0000000
0000002
2000300
0303000
0000404
0200000
3004000
";

    // no forced moves at all; needs the search
    const GUESSWORK: &str = "7,7
0000000
2050030
0000000
2060140
0000000
0000000
0030220
";

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    fn no_propagation() -> SolverConfig {
        SolverConfig { propagate: false, ..SolverConfig::default() }
    }

    #[test]
    fn parse_and_print() {
        let board = board("3,3\n101\n000\n101\n");

        assert_eq!(board.rows(), 3);
        assert_eq!(board.cols(), 3);
        assert_eq!(board.island_count(), 4);
        assert_eq!(format!("{}", board), "1.1
...
1.1
");
        assert_eq!(board.to_text(), "3,3\n101\n000\n101\n");
        assert_eq!(board.to_text().parse::<Board>().unwrap(), board);
    }

    #[test]
    fn parse_failures() {
        assert_eq!("".parse::<Board>(), Err(ParseBoardError::MissingHeader));
        assert_eq!("two,3\n".parse::<Board>(), Err(ParseBoardError::BadHeader { line: "two,3".to_owned() }));
        assert_eq!("0,3\n".parse::<Board>(), Err(ParseBoardError::BadHeader { line: "0,3".to_owned() }));
        assert_eq!("2,2\n11\n".parse::<Board>(), Err(ParseBoardError::RowCount { expected: 2, found: 1 }));
        assert_eq!("1,2\n111\n".parse::<Board>(), Err(ParseBoardError::RowLength { row: 0, expected: 2, found: 3 }));
        assert_eq!("1,2\n19\n".parse::<Board>(), Err(ParseBoardError::BadCell { location: Location(0, 1), found: '9' }));
        assert_eq!("1,2\n00\n".parse::<Board>(), Err(ParseBoardError::Invalid { reasons: vec![BuilderInvalidReason::NoIslands] }));
    }

    #[test]
    fn builder_matches_parser() {
        let built = BoardBuilder::with_dims((Dimension::new(3).unwrap(), Dimension::new(3).unwrap()))
            .add_island(Location(0, 0), 1)
            .add_island(Location(0, 2), 1)
            .add_island(Location(1, 1), 4)
            .add_island(Location(2, 0), 1)
            .add_island(Location(2, 2), 1)
            .remove_island(Location(1, 1))
            .build()
            .unwrap();

        assert_eq!(built, board("3,3\n101\n000\n101\n"));
    }

    #[test]
    fn builder_invalid() {
        let mut builder = BoardBuilder::with_dims((Dimension::new(2).unwrap(), Dimension::new(2).unwrap()));
        assert!(builder.is_valid().is_none());

        builder.add_island(Location(2, 0), 1);
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::FeatureOutOfBounds]));
        // ignored once invalid
        builder.add_island(Location(0, 0), 9);
        assert_eq!(builder.build().unwrap_err(), vec![BuilderInvalidReason::FeatureOutOfBounds]);

        let mut builder = BoardBuilder::default();
        builder.add_island(Location(0, 0), 9);
        assert_eq!(builder.build().unwrap_err(), vec![BuilderInvalidReason::BadRequirement]);

        assert_eq!(BoardBuilder::default().build().unwrap_err(), vec![BuilderInvalidReason::NoIslands]);
    }

    #[test]
    fn neighbors_skip_water() {
        let board = board("3,4\n1020\n0000\n3001\n");

        let neighbors = board.neighbors(Location(0, 0)).map(|(_, loc)| loc).collect::<Vec<_>>();
        assert_eq!(neighbors, vec![Location(2, 0), Location(0, 2)]);
        assert_eq!(board.neighbors(Location(0, 2)).count(), 1);
        assert_eq!(board.requirement(Location(7, 7)), 0);
    }

    #[test]
    fn directions() {
        let (a, b) = (Location(3, 1), Location(3, 5));

        assert_eq!(Direction::between(a, b), Some(Direction::Right));
        assert_eq!(Direction::between(b, a), Direction::between(a, b).map(|dir| dir.invert()));
        assert_eq!(Direction::between(a, Location(0, 1)), Some(Direction::Up));
        assert_eq!(Direction::between(a, Location(4, 2)), None);
        assert_eq!(Direction::between(a, a), None);
        assert_eq!(Orientation::of(a, b), Some(Orientation::Horizontal));
        assert_eq!(Orientation::of(a, Location(9, 1)), Some(Orientation::Vertical));
    }

    #[test]
    fn ledger_folds_parallel_bridges() {
        let mut ledger = BridgeLedger::new();
        let (a, b) = (Location(0, 0), Location(0, 3));

        assert!(ledger.add(a, b));
        assert!(ledger.add(b, a));
        assert!(!ledger.add(a, b));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(b, a), Some(BridgeCount::Double));
        assert_eq!(ledger.degree(a), 2);

        assert!(ledger.remove(a, b));
        assert_eq!(ledger.get(a, b), Some(BridgeCount::Single));
        assert!(ledger.remove(b, a));
        assert!(ledger.is_empty());
        assert!(!ledger.remove(a, b));

        // never diagonal, never a loop
        assert!(!ledger.add(a, Location(1, 1)));
        assert!(!ledger.add(a, a));
        assert!(ledger.is_empty());
    }

    #[test]
    fn illegal_shapes() {
        let board = board("3,3\n111\n000\n101\n");
        let ledger = BridgeLedger::new();

        assert_eq!(can_add_bridge(&board, &ledger, Location(0, 0), Location(0, 0)), Err(IllegalMove::SelfConnection));
        assert_eq!(can_add_bridge(&board, &ledger, Location(0, 1), Location(2, 2)), Err(IllegalMove::NonOrthogonal));
        assert_eq!(can_add_bridge(&board, &ledger, Location(0, 0), Location(0, 2)), Err(IllegalMove::Obstruction));
        assert_eq!(can_add_bridge(&board, &ledger, Location(0, 0), Location(1, 0)), Err(IllegalMove::NotAnIsland));
        assert_eq!(can_add_bridge(&board, &ledger, Location(0, 0), Location(9, 0)), Err(IllegalMove::NotAnIsland));
        assert_eq!(can_add_bridge(&board, &ledger, Location(0, 0), Location(2, 0)), Ok(()));
        assert_eq!(can_add_bridge(&board, &ledger, Location(2, 0), Location(0, 0)), Ok(()));
    }

    #[test]
    fn third_bridge_exceeds_capacity() {
        let mut puzzle = Puzzle::new(board("1,2\n22\n"));
        let (a, b) = (Location(0, 0), Location(0, 1));

        puzzle.try_add(a, b).unwrap();
        puzzle.try_add(b, a).unwrap();
        let before = puzzle.ledger().clone();

        assert_eq!(puzzle.try_add(a, b), Err(IllegalMove::CapacityExceeded));
        assert_eq!(puzzle.try_add(b, a), Err(IllegalMove::CapacityExceeded));
        assert_eq!(*puzzle.ledger(), before);
        assert!(puzzle.is_solved());
    }

    #[test]
    fn crossing_rejected() {
        let mut puzzle = Puzzle::new(board("3,3\n010\n101\n010\n"));

        puzzle.try_add(Location(0, 1), Location(2, 1)).unwrap();
        assert_eq!(puzzle.try_add(Location(1, 0), Location(1, 2)), Err(IllegalMove::Crossing));
        assert_eq!(puzzle.try_add(Location(1, 2), Location(1, 0)), Err(IllegalMove::Crossing));
        assert_eq!(puzzle.ledger().len(), 1);
    }

    #[test]
    fn saturated_island() {
        let mut puzzle = Puzzle::new(board("1,3\n121\n"));

        puzzle.try_add(Location(0, 0), Location(0, 1)).unwrap();
        assert_eq!(puzzle.try_add(Location(0, 1), Location(0, 0)), Err(IllegalMove::IslandSaturated));
        assert_eq!(puzzle.try_add(Location(0, 1), Location(0, 2)), Ok(()));
        assert_eq!(puzzle.try_add(Location(0, 2), Location(0, 1)), Err(IllegalMove::IslandSaturated));
        assert!(puzzle.is_solved());
    }

    #[test]
    fn removal() {
        let mut puzzle = Puzzle::new(board("1,2\n22\n"));
        let (a, b) = (Location(0, 0), Location(0, 1));

        assert_eq!(can_remove_bridge(puzzle.ledger(), a, b), Err(IllegalMove::NoBridge));
        assert_eq!(puzzle.try_remove(a, b), Err(IllegalMove::NoBridge));

        puzzle.try_add(a, b).unwrap();
        puzzle.try_add(a, b).unwrap();
        puzzle.try_remove(b, a).unwrap();
        assert_eq!(puzzle.degree(a), 1);
        puzzle.try_remove(a, b).unwrap();
        assert!(puzzle.ledger().is_empty());
    }

    #[test]
    fn connectivity() {
        let board = board("3,3\n202\n000\n202\n");
        let mut ledger = BridgeLedger::new();

        assert!(!is_fully_connected(&board, &ledger));
        assert_eq!(component_count(&board, &ledger), 4);

        ledger.add(Location(0, 0), Location(0, 2));
        ledger.add(Location(0, 0), Location(0, 2));
        ledger.add(Location(2, 0), Location(2, 2));
        assert!(!is_fully_connected(&board, &ledger));
        assert_eq!(component_count(&board, &ledger), 2);

        ledger.add(Location(0, 2), Location(2, 2));
        assert!(is_fully_connected(&board, &ledger));
        let ends = ledger.sorted().into_iter().map(|bridge| (bridge.start(), bridge.end(), bridge.count.get())).collect::<Vec<_>>();
        assert_eq!(ends, vec![
            (Location(0, 0), Location(0, 2), 2),
            (Location(0, 2), Location(2, 2), 1),
            (Location(2, 0), Location(2, 2), 1),
        ]);
        assert_eq!(component_count(&board, &ledger), 1);

        let lonely = self::board("1,1\n1\n");
        assert!(is_fully_connected(&lonely, &BridgeLedger::new()));
    }

    #[test]
    fn solve_single_bridge() {
        let mut puzzle = Puzzle::new(board("1,2\n11\n"));
        puzzle.solve(&SolverConfig::default()).unwrap();

        assert!(puzzle.is_solved());
        assert_eq!(puzzle.ledger().len(), 1);
        assert_eq!(puzzle.ledger().get(Location(0, 0), Location(0, 1)), Some(BridgeCount::Single));
        assert_eq!(format!("{}", puzzle), "11\n");
    }

    #[test]
    fn solve_double_bridge() {
        for config in [SolverConfig::default(), no_propagation()] {
            let mut puzzle = Puzzle::new(board("1,2\n22\n"));
            puzzle.solve(&config).unwrap();

            assert!(puzzle.is_solved());
            assert_eq!(puzzle.ledger().len(), 1);
            assert_eq!(puzzle.ledger().get(Location(0, 0), Location(0, 1)), Some(BridgeCount::Double));
            assert_eq!(puzzle.steps().len(), 2);
        }
    }

    #[test]
    fn disconnected_corners_unsolvable() {
        let mut puzzle = Puzzle::new(board("3,3\n101\n000\n101\n"));
        // whatever the player had laid survives a failed solve
        puzzle.try_add(Location(0, 0), Location(0, 2)).unwrap();
        let before = puzzle.ledger().clone();

        for config in [SolverConfig::default(), no_propagation()] {
            assert_eq!(puzzle.solve(&config), Err(SolverFailure::Unsolvable));
            assert_eq!(*puzzle.ledger(), before);
            assert!(puzzle.steps().is_empty());
        }
    }

    #[test]
    fn forced_bridges_rolled_back_on_failure() {
        let board = board("3,3\n020\n202\n020\n");
        let mut ledger = BridgeLedger::new();
        let mut steps = StepLog::new();

        // the top island can only reach the bottom one, which then blocks the middle row
        assert_eq!(Propagator::default().run(&board, &mut ledger, &mut steps), 2);
        assert_eq!(ledger.get(Location(0, 1), Location(2, 1)), Some(BridgeCount::Double));

        let mut puzzle = Puzzle::new(board);
        assert_eq!(puzzle.solve(&SolverConfig::default()), Err(SolverFailure::Unsolvable));
        assert!(puzzle.ledger().is_empty());
        assert!(puzzle.steps().is_empty());
    }

    #[test]
    fn propagation_alone() {
        let board = board(FORCED);
        let mut ledger = BridgeLedger::new();
        let mut steps = StepLog::new();

        let laid = Propagator::default().run(&board, &mut ledger, &mut steps);
        assert_eq!(laid, steps.len());
        assert_eq!(laid * 2, board.total_requirement());
        assert!(is_fully_connected(&board, &ledger));

        let settled = ledger.clone();
        assert_eq!(Propagator::default().run(&board, &mut ledger, &mut steps), 0);
        assert_eq!(ledger, settled);
        assert_eq!(steps.len(), laid);
    }

    #[test]
    fn solve_forced() {
        let mut puzzle = Puzzle::new(board(FORCED));
        let stats = puzzle.solve(&SolverConfig::default()).unwrap();

        assert!(puzzle.is_solved());
        assert_eq!(stats.search_steps, 0);
        assert_eq!(stats.iterations, 1);
        assert_eq!(stats.forced_steps, puzzle.steps().len());
        assert_eq!(format!("{}", puzzle), ".......
......2
2---3.H
|3-3H.H
|H.H4=4
|2.H...
3==4...
");
    }

    #[test]
    fn solve_needs_search() {
        let board = board(GUESSWORK);
        let mut ledger = BridgeLedger::new();
        assert_eq!(Propagator::default().run(&board, &mut ledger, &mut StepLog::new()), 0);

        for config in [SolverConfig::default(), no_propagation()] {
            let mut puzzle = Puzzle::new(board.clone());
            let stats = puzzle.solve(&config).unwrap();

            assert!(puzzle.is_solved());
            assert_eq!(stats.forced_steps, 0);
            assert!(stats.iterations > 1);
            assert_eq!(stats.search_steps, puzzle.steps().len());
            assert_eq!(puzzle.steps().len() * 2, board.total_requirement());
        }
    }

    #[test]
    fn replay_reproduces_solution() {
        let mut puzzle = Puzzle::new(board(GUESSWORK));
        puzzle.solve(&SolverConfig::default()).unwrap();

        let mut ledger = BridgeLedger::new();
        ledger.add(Location(1, 0), Location(3, 0));
        puzzle.steps().replay(puzzle.board(), &mut ledger).unwrap();
        assert_eq!(ledger, *puzzle.ledger());

        let mut ledger = BridgeLedger::new();
        let mut index = 0;
        while puzzle.steps().replay_step(index, puzzle.board(), &mut ledger).unwrap() {
            index += 1;
            assert_eq!(ledger.iter().map(|bridge| bridge.count.get()).sum::<usize>(), index);
        }
        assert_eq!(index, puzzle.steps().len());
        assert_eq!(ledger, *puzzle.ledger());
    }

    #[test]
    fn replay_refuses_illegal_step() {
        let board = board("1,2\n11\n");
        let mut steps = StepLog::new();
        steps.record_add(Location(0, 0), Location(0, 1));
        steps.record_add(Location(0, 1), Location(0, 0));

        let err = steps.replay(&board, &mut BridgeLedger::new()).unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.reason, IllegalMove::IslandSaturated);
        assert_eq!(steps.iter().next(), Some(&Step::Added { from: Location(0, 0), to: Location(0, 1) }));
    }

    #[test]
    fn iteration_cap() {
        let mut puzzle = Puzzle::new(board(GUESSWORK));
        let config = SolverConfig { max_iterations: 10, ..no_propagation() };

        assert_eq!(puzzle.solve(&config), Err(SolverFailure::SearchAborted { iterations: 10 }));
        assert!(puzzle.ledger().is_empty());
        assert!(puzzle.steps().is_empty());

        let config = SolverConfig { max_iterations: 0, ..SolverConfig::default() };
        let mut puzzle = Puzzle::new(board("1,2\n11\n"));
        assert_eq!(puzzle.solve(&config), Err(SolverFailure::SearchAborted { iterations: 0 }));
    }

    #[test]
    fn over_saturated_ledger() {
        let board = board("1,2\n11\n");
        let mut ledger = BridgeLedger::new();
        // bypasses the gate on purpose
        ledger.add(Location(0, 0), Location(0, 1));
        ledger.add(Location(0, 0), Location(0, 1));
        let before = ledger.clone();

        let mut steps = StepLog::new();
        let result = BacktrackingSolver::new(&board, 1_000).solve(&mut ledger, &mut steps);
        assert_eq!(result, Err(SolverFailure::InvariantViolation));
        assert_eq!(ledger, before);
    }

    #[test]
    fn reset() {
        let mut puzzle = Puzzle::new(board(FORCED));
        puzzle.solve(&SolverConfig::default()).unwrap();
        puzzle.reset();

        assert!(puzzle.ledger().is_empty());
        assert!(puzzle.steps().is_empty());
        assert!(!puzzle.is_complete());
    }
}

#[cfg(test)]
mod properties {
    use itertools::Itertools;
    use proptest::prelude::*;
    use proptest::sample::Index;

    use crate::bridge::segments_cross;
    use crate::builder::BoardBuilder;
    use crate::ledger::BridgeLedger;
    use crate::legality::{add_checked, can_add_bridge, is_obstructed, remove_checked};
    use crate::location::{Dimension, Location};
    use crate::propagate::Propagator;
    use crate::solver::{solve, SolverConfig};
    use crate::steps::StepLog;
    use crate::Board;

    fn arb_board() -> impl Strategy<Value = Board> {
        (1usize..=5, 1usize..=5)
            .prop_flat_map(|(rows, cols)| {
                (Just(rows), Just(cols), prop::collection::vec(prop_oneof![3 => Just(0u8), 2 => 1u8..=4u8], rows * cols))
            })
            .prop_filter_map("board needs an island", |(rows, cols, cells)| {
                let mut builder = BoardBuilder::with_dims((Dimension::new(rows)?, Dimension::new(cols)?));
                for (index, requirement) in cells.into_iter().enumerate() {
                    if requirement > 0 {
                        builder.add_island(Location(index / cols, index % cols), requirement);
                    }
                }
                builder.build().ok()
            })
    }

    fn arb_edits() -> impl Strategy<Value = Vec<(Index, Index, bool)>> {
        prop::collection::vec((any::<Index>(), any::<Index>(), any::<bool>()), 0..40)
    }

    // play random edits through the gate, ignoring refusals
    fn play(board: &Board, edits: &[(Index, Index, bool)]) -> BridgeLedger {
        let islands = board.islands().collect_vec();
        let mut ledger = BridgeLedger::new();
        for (a, b, add) in edits {
            let (a, b) = (*a.get(&islands), *b.get(&islands));
            let _ = match add {
                true => add_checked(board, &mut ledger, a, b),
                false => remove_checked(&mut ledger, a, b),
            };
        }

        ledger
    }

    fn assert_well_formed(board: &Board, ledger: &BridgeLedger) {
        for island in board.islands() {
            assert!(ledger.degree(island) <= board.requirement(island));
        }
        for bridge in ledger.iter() {
            assert!(board.is_island(bridge.start()) && board.is_island(bridge.end()));
            assert!(!is_obstructed(board, bridge.start(), bridge.end()));
        }
        for (first, second) in ledger.iter().collect_vec().into_iter().tuple_combinations() {
            assert!(!segments_cross((first.start(), first.end()), (second.start(), second.end())));
        }
    }

    proptest! {
        #[test]
        fn gated_edits_keep_invariants(board in arb_board(), edits in arb_edits()) {
            let islands = board.islands().collect_vec();
            let mut ledger = BridgeLedger::new();
            for (a, b, add) in &edits {
                let (a, b) = (*a.get(&islands), *b.get(&islands));
                let _ = match add {
                    true => add_checked(&board, &mut ledger, a, b),
                    false => remove_checked(&mut ledger, a, b),
                };
                assert_well_formed(&board, &ledger);
            }
        }

        #[test]
        fn legality_is_symmetric(board in arb_board(), edits in arb_edits()) {
            let ledger = play(&board, &edits);
            for (a, b) in board.islands().cartesian_product(board.islands().collect_vec()) {
                prop_assert_eq!(can_add_bridge(&board, &ledger, a, b), can_add_bridge(&board, &ledger, b, a));
            }
        }

        #[test]
        fn add_then_remove_round_trips(board in arb_board(), edits in arb_edits()) {
            let ledger = play(&board, &edits);
            for (a, b) in board.islands().collect_vec().into_iter().tuple_combinations() {
                let mut edited = ledger.clone();
                if add_checked(&board, &mut edited, a, b).is_ok() {
                    remove_checked(&mut edited, a, b).unwrap();
                    prop_assert_eq!(&edited, &ledger);
                }
            }
        }

        #[test]
        fn propagation_is_idempotent(board in arb_board()) {
            let mut ledger = BridgeLedger::new();
            let mut steps = StepLog::new();
            Propagator::default().run(&board, &mut ledger, &mut steps);
            assert_well_formed(&board, &ledger);

            let settled = (ledger.clone(), steps.clone());
            prop_assert_eq!(Propagator::default().run(&board, &mut ledger, &mut steps), 0);
            prop_assert_eq!((ledger, steps), settled);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn solve_is_sound(board in arb_board(), propagate in any::<bool>()) {
            let mut ledger = BridgeLedger::new();
            let mut steps = StepLog::new();
            let config = SolverConfig { max_iterations: 50_000, propagate, ..SolverConfig::default() };

            match solve(&board, &mut ledger, &mut steps, &config) {
                Ok(_) => {
                    assert_well_formed(&board, &ledger);
                    prop_assert!(board.islands().all(|island| ledger.degree(island) == board.requirement(island)));
                    prop_assert!(crate::connectivity::is_fully_connected(&board, &ledger));

                    let mut replayed = BridgeLedger::new();
                    steps.replay(&board, &mut replayed).unwrap();
                    prop_assert_eq!(replayed, ledger);
                }
                Err(_) => {
                    prop_assert!(ledger.is_empty());
                    prop_assert!(steps.is_empty());
                }
            }
        }
    }
}
