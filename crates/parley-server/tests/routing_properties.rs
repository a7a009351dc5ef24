//! Property-based tests for mediator routing.
//!
//! The main test drives the server and a naive reference model through the
//! same random operation sequences and checks that every history, undo log,
//! and block entry agrees at the end. Two smaller properties pin the
//! registration and blocking laws directly.

use std::collections::{BTreeMap, BTreeSet};

use parley_core::{ManualClock, User, UserId};
use parley_server::{ChatServer, RegistryError};
use proptest::prelude::*;

const IDS: [&str; 4] = ["alice", "bob", "carol", "dan"];

/// One randomly chosen mediator operation over a small id universe.
#[derive(Debug, Clone)]
enum Op {
    Register(usize),
    Unregister(usize),
    Block(usize),
    Send { sender: usize, recipients: Vec<usize>, content: String },
    Undo(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let id = 0..IDS.len();
    prop_oneof![
        id.clone().prop_map(Op::Register),
        id.clone().prop_map(Op::Unregister),
        id.clone().prop_map(Op::Block),
        (
            0..IDS.len(),
            prop::collection::vec(0..IDS.len(), 0..4),
            "[a-z]{0,8}"
        )
            .prop_map(|(sender, recipients, content)| Op::Send { sender, recipients, content }),
        id.prop_map(Op::Undo),
    ]
}

/// Naive reference: histories as (sender, content) sequences, plus undo
/// counts and the block set.
#[derive(Debug, Default)]
struct Model {
    histories: BTreeMap<String, Vec<(String, String)>>,
    undo_counts: BTreeMap<String, usize>,
    blocked: BTreeSet<String>,
}

impl Model {
    fn registered(&self, id: &str) -> bool {
        self.histories.contains_key(id)
    }
}

fn dedup(recipients: &[usize]) -> Vec<usize> {
    let mut out = Vec::new();
    for &r in recipients {
        if !out.contains(&r) {
            out.push(r);
        }
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: the server agrees with the reference model after any
    /// operation sequence.
    #[test]
    fn prop_server_matches_reference_model(
        ops in prop::collection::vec(op_strategy(), 0..48)
    ) {
        let mut server = ChatServer::with_clock(ManualClock::new(0));
        let mut model = Model::default();

        for op in ops {
            match op {
                Op::Register(i) => {
                    let id = IDS[i];
                    let result = server.register(User::new(id));
                    if model.registered(id) {
                        prop_assert_eq!(
                            result,
                            Err(RegistryError::DuplicateUser(id.to_string()))
                        );
                    } else {
                        prop_assert_eq!(result, Ok(()));
                        model.histories.insert(id.to_string(), Vec::new());
                        model.undo_counts.insert(id.to_string(), 0);
                    }
                },
                Op::Unregister(i) => {
                    let id = IDS[i];
                    let evicted = server.unregister(id);
                    prop_assert_eq!(evicted.is_some(), model.registered(id));
                    let _ = model.histories.remove(id);
                    let _ = model.undo_counts.remove(id);
                },
                Op::Block(i) => {
                    let id = IDS[i];
                    server.block(id);
                    model.blocked.insert(id.to_string());
                },
                Op::Send { sender, recipients, content } => {
                    let sender = IDS[sender];
                    let recipient_ids: Vec<UserId> =
                        recipients.iter().map(|&r| IDS[r].to_string()).collect();
                    let result = server.send(sender, recipient_ids, content.clone());

                    if model.registered(sender) {
                        prop_assert!(result.is_ok());
                        for r in dedup(&recipients) {
                            let recipient = IDS[r];
                            if model.registered(recipient)
                                && !model.blocked.contains(recipient)
                            {
                                if let Some(history) =
                                    model.histories.get_mut(recipient)
                                {
                                    history.push((
                                        sender.to_string(),
                                        content.clone(),
                                    ));
                                }
                            }
                        }
                        // The sender's own copy lands after routing.
                        if let Some(history) = model.histories.get_mut(sender) {
                            history.push((sender.to_string(), content.clone()));
                        }
                    } else {
                        prop_assert_eq!(
                            result,
                            Err(RegistryError::UnknownUser(sender.to_string()))
                        );
                    }
                },
                Op::Undo(i) => {
                    let id = IDS[i];
                    let snapshot = server.undo_last_send(id);
                    let undone = model.histories.get_mut(id).and_then(|history| {
                        let index =
                            history.iter().rposition(|(sender, _)| sender == id)?;
                        Some(history.remove(index))
                    });
                    match (&snapshot, &undone) {
                        (Some(snapshot), Some((_, content))) => {
                            prop_assert_eq!(snapshot.content(), content);
                            if let Some(count) = model.undo_counts.get_mut(id) {
                                *count += 1;
                            }
                        },
                        (None, None) => {},
                        _ => {
                            return Err(TestCaseError::fail(format!(
                                "undo disagreement for {id}: server={snapshot:?} model={undone:?}"
                            )));
                        },
                    }
                },
            }
        }

        // Final states agree.
        prop_assert_eq!(server.user_count(), model.histories.len());
        for (id, expected) in &model.histories {
            let user = server.user(id);
            prop_assert!(user.is_some());
            if let Some(user) = user {
                let got: Vec<(String, String)> = user
                    .history()
                    .iter()
                    .map(|m| (m.sender().to_string(), m.content().to_string()))
                    .collect();
                prop_assert_eq!(&got, expected);
                prop_assert_eq!(
                    Some(&user.undo_log().len()),
                    model.undo_counts.get(id)
                );
            }
        }
        for id in IDS {
            prop_assert_eq!(server.is_blocked(id), model.blocked.contains(id));
        }
    }

    /// Property: registering a taken id always fails and never clobbers the
    /// existing user's state.
    #[test]
    fn prop_duplicate_registration_always_fails(
        id in "[a-z]{1,12}",
        content in "[a-z]{1,8}"
    ) {
        let mut server = ChatServer::with_clock(ManualClock::new(0));
        server.register(User::new(id.clone())).unwrap();
        server.send(&id, vec![], content).unwrap();

        let result = server.register(User::new(id.clone()));

        prop_assert_eq!(result, Err(RegistryError::DuplicateUser(id.clone())));
        prop_assert_eq!(server.user(&id).map(|u| u.history().len()), Some(1));
    }

    /// Property: once blocked, a recipient never receives anything, from any
    /// sender, however often they are addressed.
    #[test]
    fn prop_blocked_recipient_never_receives(
        sends in prop::collection::vec((0..IDS.len(), "[a-z]{0,8}"), 1..16),
        target in 0..IDS.len()
    ) {
        let mut server = ChatServer::with_clock(ManualClock::new(0));
        for id in IDS {
            server.register(User::new(id)).unwrap();
        }
        let target = IDS[target];
        server.block(target);

        for (sender, content) in sends {
            server.send(IDS[sender], vec![target.to_string()], content).unwrap();
        }

        let received = server
            .user(target)
            .map(|u| u.history().iter().filter(|m| m.sender() != target).count());
        prop_assert_eq!(received, Some(0));
    }
}
