use crate::goal::GoalDescription;
use crate::heuristic::{DistanceTable, Heuristic};
use crate::level::Level;
use crate::solver::SearchErr;
use crate::state::State;

/// Minimum-cost assignment of boxes to box goals (per letter),
/// plus agent distances to their goals and to the closest box they still have to move.
///
/// Doesn't depend on the order of boxes or goals.
/// Box ordering alone can't make it inadmissible but the agent term can
/// (an agent might not need to touch any box), so it's still meant for greedy search.
#[derive(Debug, Clone, Default)]
pub struct Matching {
    dists: Option<DistanceTable>,
}

impl Matching {
    pub fn new() -> Self {
        Matching { dists: None }
    }
}

impl Heuristic for Matching {
    fn preprocess(&mut self, level: &Level) -> Result<(), SearchErr> {
        self.dists = Some(DistanceTable::manhattan(level)?);
        Ok(())
    }

    fn h(&self, state: &State<'_>, goal: &GoalDescription) -> Result<u32, SearchErr> {
        let dists = self
            .dists
            .as_ref()
            .ok_or(SearchErr::PreprocessingUnavailable)?;

        let mut total = 0;

        // boxes to goals, letters are independent of each other
        let mut letters: Vec<char> = goal
            .box_goals()
            .iter()
            .filter(|g| g.positive)
            .map(|g| g.ch)
            .collect();
        letters.sort();
        letters.dedup();
        for letter in letters {
            let costs: Vec<Vec<u32>> = goal
                .box_goals()
                .iter()
                .filter(|g| g.positive && g.ch == letter)
                .map(|g| {
                    state
                        .boxes()
                        .iter()
                        .filter(|b| b.letter == letter)
                        .map(|b| u32::from(dists.get(g.pos, b.pos)))
                        .collect()
                })
                .collect();
            total += min_cost_assignment(&costs);
        }

        for agent in state.agents() {
            // own goal
            for g in goal.agent_goals() {
                if g.positive && g.ch == agent.id {
                    total += u32::from(dists.get(agent.pos, g.pos));
                }
            }

            // closest box of our color that's not done yet
            let closest = state
                .boxes()
                .iter()
                .filter(|b| state.level().can_move_box(agent.id, b.letter))
                .filter(|b| {
                    !goal
                        .box_goals()
                        .iter()
                        .any(|g| g.positive && g.ch == b.letter && g.pos == b.pos)
                })
                .filter(|b| {
                    goal.box_goals()
                        .iter()
                        .any(|g| g.positive && g.ch == b.letter)
                })
                .map(|b| u32::from(dists.get(agent.pos, b.pos)))
                .min();
            // standing next to a box costs nothing more than the push itself
            if let Some(dist) = closest {
                total += dist.saturating_sub(1);
            }
        }

        Ok(total)
    }

    fn name(&self) -> &'static str {
        "matching"
    }
}

/// Hungarian algorithm, O(n^2 * m) for n rows and m columns.
///
/// Rows are assigned to distinct columns (or the other way around if there are more rows),
/// returns the sum of the chosen costs.
fn min_cost_assignment(costs: &[Vec<u32>]) -> u32 {
    let rows = costs.len();
    let cols = costs.first().map_or(0, Vec::len);
    if rows == 0 || cols == 0 {
        return 0;
    }
    if rows > cols {
        let transposed: Vec<Vec<u32>> = (0..cols)
            .map(|c| (0..rows).map(|r| costs[r][c]).collect())
            .collect();
        return min_cost_assignment(&transposed);
    }

    let inf = i64::max_value() / 4;
    // 1-based, index 0 is the virtual start
    let mut u = vec![0i64; rows + 1];
    let mut v = vec![0i64; cols + 1];
    let mut assigned_row = vec![0usize; cols + 1];
    let mut way = vec![0usize; cols + 1];

    for row in 1..=rows {
        assigned_row[0] = row;
        let mut col0 = 0;
        let mut min_v = vec![inf; cols + 1];
        let mut used = vec![false; cols + 1];
        loop {
            used[col0] = true;
            let row0 = assigned_row[col0];
            let mut delta = inf;
            let mut col1 = 0;
            for col in 1..=cols {
                if used[col] {
                    continue;
                }
                let cur = i64::from(costs[row0 - 1][col - 1]) - u[row0] - v[col];
                if cur < min_v[col] {
                    min_v[col] = cur;
                    way[col] = col0;
                }
                if min_v[col] < delta {
                    delta = min_v[col];
                    col1 = col;
                }
            }
            for col in 0..=cols {
                if used[col] {
                    u[assigned_row[col]] += delta;
                    v[col] -= delta;
                } else {
                    min_v[col] -= delta;
                }
            }
            col0 = col1;
            if assigned_row[col0] == 0 {
                break;
            }
        }
        loop {
            let col1 = way[col0];
            assigned_row[col0] = assigned_row[col1];
            col0 = col1;
            if col0 == 0 {
                break;
            }
        }
    }

    (1..=cols)
        .filter(|&col| assigned_row[col] != 0)
        .map(|col| costs[assigned_row[col] - 1][col - 1])
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Pos;
    use crate::goal::SubGoal;
    use crate::state::{Agent, BoxItem};

    #[test]
    fn assignment() {
        assert_eq!(min_cost_assignment(&[]), 0);
        assert_eq!(min_cost_assignment(&[vec![]]), 0);
        assert_eq!(min_cost_assignment(&[vec![5]]), 5);
        // greedy would take 1 and then be forced into 10
        assert_eq!(min_cost_assignment(&[vec![1, 2], vec![3, 10]]), 5);
        assert_eq!(
            min_cost_assignment(&[vec![4, 1, 3], vec![2, 0, 5], vec![3, 2, 2]]),
            5
        );
        // rectangular both ways
        assert_eq!(min_cost_assignment(&[vec![7, 3, 9]]), 3);
        assert_eq!(min_cost_assignment(&[vec![7], vec![3], vec![9]]), 3);
        assert_eq!(min_cost_assignment(&[vec![1, 4, 6], vec![2, 8, 3]]), 4);
    }

    #[test]
    fn independent_of_box_order() {
        // 0 A . B . . .
        let level = Level::uncolored(vec![vec![false; 7]]);
        let mut heuristic = Matching::new();
        heuristic.preprocess(&level).unwrap();

        let goal = GoalDescription::new(vec![
            SubGoal::new(Pos::new(0, 6), 'A', true),
            SubGoal::new(Pos::new(0, 4), 'A', true),
        ]);
        let s1 = State::initial(
            &level,
            vec![Agent::new(Pos::new(0, 0), '0')],
            vec![
                BoxItem::new(Pos::new(0, 1), 'A'),
                BoxItem::new(Pos::new(0, 3), 'A'),
            ],
        );
        let s2 = State::initial(
            &level,
            vec![Agent::new(Pos::new(0, 0), '0')],
            vec![
                BoxItem::new(Pos::new(0, 3), 'A'),
                BoxItem::new(Pos::new(0, 1), 'A'),
            ],
        );
        // boxes: 1->4, 3->6 or 1->6, 3->4 both 6, agent is next to a box
        assert_eq!(heuristic.h(&s1, &goal).unwrap(), 6);
        assert_eq!(heuristic.h(&s2, &goal).unwrap(), 6);
    }

    #[test]
    fn solved_is_zero() {
        let level = Level::uncolored(vec![vec![false; 4]]);
        let mut heuristic = Matching::new();
        heuristic.preprocess(&level).unwrap();

        let goal = GoalDescription::new(vec![
            SubGoal::new(Pos::new(0, 0), '0', true),
            SubGoal::new(Pos::new(0, 3), 'A', true),
        ]);
        let state = State::initial(
            &level,
            vec![Agent::new(Pos::new(0, 0), '0')],
            vec![BoxItem::new(Pos::new(0, 3), 'A')],
        );
        assert!(goal.is_goal(&state));
        assert_eq!(heuristic.h(&state, &goal).unwrap(), 0);
    }

    #[test]
    fn not_preprocessed() {
        let level = Level::uncolored(vec![vec![false; 4]]);
        let state = State::initial(&level, vec![Agent::new(Pos::new(0, 0), '0')], vec![]);
        assert_eq!(
            Matching::new().h(&state, &GoalDescription::default()),
            Err(SearchErr::PreprocessingUnavailable)
        );
    }
}
