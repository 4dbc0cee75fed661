use std::rc::Rc;

use crate::data::{Pos, DIRECTIONS};
use crate::moves::{Action, JointAction};
use crate::state::State;

/// Transition model used by the search.
///
/// Returns every state reachable in one joint step, each child carries
/// the joint action that produced it (`State::action`).
/// Must be deterministic - same state, same children in the same order.
pub trait Successors {
    fn expand<'a>(&self, state: &Rc<State<'a>>) -> Vec<State<'a>>;
}

/// Hospital domain rules.
///
/// Each agent can wait, move into a free cell, push a box of its color away from itself
/// or pull one behind itself. A joint action is legal when every individual action is
/// legal in the current state and no two of them claim the same free cell or the same box.
#[derive(Debug, Clone, Copy, Default)]
pub struct HospitalSuccessors;

/// What a single applicable action does.
#[derive(Debug, Clone, Copy)]
struct Effect {
    action: Action,
    agent_dest: Pos,
    /// box index and its destination
    moved_box: Option<(usize, Pos)>,
    /// cell that was free and becomes occupied
    claimed: Option<Pos>,
}

impl HospitalSuccessors {
    pub fn new() -> Self {
        HospitalSuccessors
    }

    fn agent_effects(state: &State<'_>, agent_index: usize) -> Vec<Effect> {
        let agent = state.agents()[agent_index];
        let level = state.level();
        let mut effects = vec![Effect {
            action: Action::NoOp,
            agent_dest: agent.pos,
            moved_box: None,
            claimed: None,
        }];

        for &dir in &DIRECTIONS {
            if let Some(dest) = agent.pos.step(dir) {
                if state.is_free(dest) {
                    effects.push(Effect {
                        action: Action::Move(dir),
                        agent_dest: dest,
                        moved_box: None,
                        claimed: Some(dest),
                    });
                }
            }
        }

        for &agent_dir in &DIRECTIONS {
            let box_pos = match agent.pos.step(agent_dir) {
                Some(pos) => pos,
                None => continue,
            };
            let box_index = match state.box_at(box_pos) {
                Some(i) => i,
                None => continue,
            };
            if !level.can_move_box(agent.id, state.boxes()[box_index].letter) {
                continue;
            }
            for &box_dir in &DIRECTIONS {
                // pushing back into the agent
                if box_dir == agent_dir.inverse() {
                    continue;
                }
                if let Some(box_dest) = box_pos.step(box_dir) {
                    if state.is_free(box_dest) {
                        effects.push(Effect {
                            action: Action::Push(agent_dir, box_dir),
                            agent_dest: box_pos,
                            moved_box: Some((box_index, box_dest)),
                            claimed: Some(box_dest),
                        });
                    }
                }
            }
        }

        for &agent_dir in &DIRECTIONS {
            let agent_dest = match agent.pos.step(agent_dir) {
                Some(pos) if state.is_free(pos) => pos,
                _ => continue,
            };
            for &box_dir in &DIRECTIONS {
                // the box would have to be where the agent is going
                if box_dir == agent_dir {
                    continue;
                }
                let box_pos = match agent.pos.step(box_dir) {
                    Some(pos) => pos,
                    None => continue,
                };
                if let Some(box_index) = state.box_at(box_pos) {
                    if level.can_move_box(agent.id, state.boxes()[box_index].letter) {
                        effects.push(Effect {
                            action: Action::Pull(agent_dir, box_dir),
                            agent_dest,
                            moved_box: Some((box_index, agent.pos)),
                            claimed: Some(agent_dest),
                        });
                    }
                }
            }
        }

        effects
    }

    fn is_conflicting(effects: &[Effect]) -> bool {
        for (i, a) in effects.iter().enumerate() {
            for b in &effects[i + 1..] {
                if a.claimed.is_some() && a.claimed == b.claimed {
                    return true;
                }
                if let (Some((box_a, _)), Some((box_b, _))) = (a.moved_box, b.moved_box) {
                    if box_a == box_b {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn apply<'a>(state: &Rc<State<'a>>, effects: &[Effect], action: JointAction) -> State<'a> {
        let mut agents = state.agents().to_vec();
        let mut boxes = state.boxes().to_vec();
        for (agent, effect) in agents.iter_mut().zip(effects) {
            agent.pos = effect.agent_dest;
            if let Some((box_index, box_dest)) = effect.moved_box {
                boxes[box_index].pos = box_dest;
            }
        }
        State::child(state, action, agents, boxes)
    }
}

impl Successors for HospitalSuccessors {
    fn expand<'a>(&self, state: &Rc<State<'a>>) -> Vec<State<'a>> {
        let per_agent: Vec<Vec<Effect>> = (0..state.agents().len())
            .map(|i| Self::agent_effects(state, i))
            .collect();

        let mut children = Vec::new();
        if per_agent.is_empty() {
            return children;
        }

        // odometer over the cartesian product, last agent changes fastest
        let mut indices = vec![0; per_agent.len()];
        let mut joint = Vec::with_capacity(per_agent.len());
        loop {
            joint.clear();
            joint.extend(indices.iter().zip(&per_agent).map(|(&i, effects)| effects[i]));

            let action = JointAction::new(joint.iter().map(|e| e.action).collect());
            if !action.is_noop() && !Self::is_conflicting(&joint) {
                children.push(Self::apply(state, &joint, action));
            }

            let mut agent = per_agent.len();
            loop {
                if agent == 0 {
                    return children;
                }
                agent -= 1;
                indices[agent] += 1;
                if indices[agent] < per_agent[agent].len() {
                    break;
                }
                indices[agent] = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dir;
    use crate::level::Level;

    fn expand_level(level: &str) -> Vec<String> {
        let problem: crate::parser::Problem = level.parse().unwrap();
        let initial = Rc::new(problem.initial_state());
        let children = HospitalSuccessors::new().expand(&initial);
        children
            .iter()
            .map(|s| s.action().unwrap().to_string())
            .collect()
    }

    #[test]
    fn single_agent_moves() {
        let actions = expand_level(
            r"
#domain
hospital
#levelname
moves
#colors
blue: 0
#initial
+++++
+   +
+ 0 +
+++++
#goal
+++++
+   +
+ 0 +
+++++
#end
",
        );
        assert_eq!(actions, vec!["Move(N)", "Move(E)", "Move(W)"]);
    }

    #[test]
    fn push_and_pull() {
        let actions = expand_level(
            r"
#domain
hospital
#levelname
push-pull
#colors
blue: 0, A
#initial
+++++++
+     +
+ 0A  +
+++++++
#goal
+++++++
+     +
+ 0A  +
+++++++
#end
",
        );
        assert_eq!(
            actions,
            vec![
                "Move(N)",
                "Move(W)",
                "Push(E,N)",
                "Push(E,E)",
                "Pull(N,E)",
                "Pull(W,E)",
            ]
        );
    }

    #[test]
    fn other_colors_cannot_be_moved() {
        let actions = expand_level(
            r"
#domain
hospital
#levelname
colors
#colors
blue: 0
red: A
#initial
++++++
+0A  +
++++++
#goal
++++++
+0A  +
++++++
#end
",
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn joint_conflicts() {
        // both agents want the middle cell, the all-noop action is never generated
        let level = Level::uncolored(vec![vec![false; 3]]);
        let state = Rc::new(State::initial(
            &level,
            vec![
                crate::state::Agent::new(Pos::new(0, 0), '0'),
                crate::state::Agent::new(Pos::new(0, 2), '1'),
            ],
            vec![],
        ));
        let children = HospitalSuccessors::new().expand(&state);
        let actions: Vec<_> = children
            .iter()
            .map(|s| s.action().unwrap().to_string())
            .collect();
        assert_eq!(actions, vec!["NoOp|Move(W)", "Move(E)|NoOp"]);
        for child in &children {
            assert_eq!(child.g(), 1);
            assert!(Rc::ptr_eq(child.parent().unwrap(), &state));
        }
    }

    #[test]
    fn walled_in_agents() {
        // every agent can only wait so there is nothing to generate
        let level = Level::uncolored(vec![vec![false], vec![true], vec![false]]);
        let state = Rc::new(State::initial(
            &level,
            vec![
                crate::state::Agent::new(Pos::new(0, 0), '0'),
                crate::state::Agent::new(Pos::new(2, 0), '1'),
            ],
            vec![],
        ));
        assert!(HospitalSuccessors::new().expand(&state).is_empty());
    }

    #[test]
    fn same_box_conflict() {
        // 0 A 1 - both agents could push or pull the same box
        let level = Level::uncolored(vec![vec![false; 3], vec![false; 3]]);
        let state = Rc::new(State::initial(
            &level,
            vec![
                crate::state::Agent::new(Pos::new(0, 0), '0'),
                crate::state::Agent::new(Pos::new(0, 2), '1'),
            ],
            vec![crate::state::BoxItem::new(Pos::new(0, 1), 'A')],
        ));
        let children = HospitalSuccessors::new().expand(&state);
        for child in &children {
            let actions = child.action().unwrap().actions();
            let moves_box = |a: &Action| match a {
                Action::Push(..) | Action::Pull(..) => true,
                _ => false,
            };
            assert!(!(moves_box(&actions[0]) && moves_box(&actions[1])));
        }
        assert!(children.iter().any(|c| c.action().unwrap().actions()[0]
            == Action::Push(Dir::E, Dir::S)));
    }

    #[test]
    fn no_agents() {
        let level = Level::uncolored(vec![vec![false; 3]]);
        let state = Rc::new(State::initial(&level, vec![], vec![]));
        assert!(HospitalSuccessors::new().expand(&state).is_empty());
    }
}
