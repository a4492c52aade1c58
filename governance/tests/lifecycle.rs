//! End-to-end proposal lifecycle: propose → vote → close → execute,
//! driven through the public engine API on top of nullable collaborators.

mod common;

use civic_governance::{GovernanceError, GovernanceEvent, ProposalState};
use civic_types::{BlockHeight, ProposalId, StakeAmount};
use common::*;

#[test]
fn proposal_window_starts_at_creation_block() {
    let (env, _) = env();
    env.clock.set(START + 7);
    let id = env
        .engine
        .propose(&account("proposer"), &set_target(1), "late start")
        .unwrap();
    let p = env.engine.proposal(id).unwrap();
    assert_eq!(p.start_block, BlockHeight::new(START + 7));
    assert_eq!(p.end_block, BlockHeight::new(START + 7 + VOTING_PERIOD));
    assert!(p.end_block > p.start_block);
    assert_eq!(p.proposer, account("proposer"));
    assert_eq!(p.description, "late start");
}

#[test]
fn proposal_ids_are_sequential() {
    let (env, _) = env();
    for expected in 0..3 {
        let id = env
            .engine
            .propose(&account("proposer"), &set_target(expected), "p")
            .unwrap();
        assert_eq!(id, ProposalId::new(expected as u64));
    }
    assert_eq!(env.engine.proposal_count().unwrap(), 3);
}

#[test]
fn two_holders_pass_quorum_and_execute_after_delay() {
    let (env, executor) = env();
    give_weight(&env, "alice", 15_000);
    give_weight(&env, "bob", 15_000);

    let id = env
        .engine
        .propose(&account("proposer"), &set_target(42), "raise target")
        .unwrap();
    env.engine.vote(&account("alice"), id, true).unwrap();
    env.engine.vote(&account("bob"), id, true).unwrap();

    let p = env.engine.proposal(id).unwrap();
    assert_eq!(p.for_votes, StakeAmount::new(30_000));
    assert_eq!(p.against_votes, StakeAmount::ZERO);

    // Window closed but delay pending.
    env.clock.set(START + VOTING_PERIOD);
    assert_eq!(env.engine.proposal_state(id).unwrap(), ProposalState::Succeeded);
    assert!(matches!(
        env.engine.execute(id),
        Err(GovernanceError::DelayNotElapsed { .. })
    ));
    assert!(executor.invocations().is_empty());

    env.skip_to_executable();
    env.engine.execute(id).unwrap();
    assert_eq!(executor.invocations(), vec![set_target(42)]);
    assert_eq!(env.engine.proposal_state(id).unwrap(), ProposalState::Executed);

    assert!(matches!(
        env.engine.execute(id),
        Err(GovernanceError::AlreadyExecuted(_))
    ));
    assert_eq!(executor.invocations().len(), 1);
}

#[test]
fn tie_is_rejected_forever() {
    let (env, executor) = env();
    give_weight(&env, "alice", 10_000);
    give_weight(&env, "bob", 10_000);

    let id = env
        .engine
        .propose(&account("proposer"), &set_target(1), "tie")
        .unwrap();
    env.engine.vote(&account("alice"), id, true).unwrap();
    env.engine.vote(&account("bob"), id, false).unwrap();

    env.skip_to_executable();
    assert_eq!(env.engine.proposal_state(id).unwrap(), ProposalState::Defeated);
    for later in [0, 1, 10_000] {
        env.clock.advance(later);
        assert!(matches!(
            env.engine.execute(id),
            Err(GovernanceError::ProposalRejected { .. })
        ));
    }
    // No re-vote after close either.
    assert!(matches!(
        env.engine.vote(&account("carol"), id, true),
        Err(GovernanceError::WindowClosed(_))
    ));
    assert!(executor.invocations().is_empty());
}

#[test]
fn below_quorum_cannot_execute() {
    let (env, _) = env();
    give_weight(&env, "alice", 19_999);
    let id = env
        .engine
        .propose(&account("proposer"), &set_target(1), "thin")
        .unwrap();
    env.engine.vote(&account("alice"), id, true).unwrap();

    env.skip_to_executable();
    assert!(matches!(
        env.engine.execute(id),
        Err(GovernanceError::QuorumNotMet { .. })
    ));
}

#[test]
fn against_votes_count_towards_quorum() {
    let (env, _) = env();
    give_weight(&env, "alice", 12_000);
    give_weight(&env, "bob", 8_000);
    let id = env
        .engine
        .propose(&account("proposer"), &set_target(1), "contested")
        .unwrap();
    env.engine.vote(&account("alice"), id, true).unwrap();
    env.engine.vote(&account("bob"), id, false).unwrap();

    env.skip_to_executable();
    env.engine.execute(id).unwrap();
}

#[test]
fn duplicate_ballot_rejected_regardless_of_support() {
    let (env, _) = env();
    give_weight(&env, "alice", 15_000);
    let id = env
        .engine
        .propose(&account("proposer"), &set_target(1), "dup")
        .unwrap();
    env.engine.vote(&account("alice"), id, true).unwrap();

    for support in [true, false] {
        let err = env.engine.vote(&account("alice"), id, support).unwrap_err();
        assert!(matches!(err, GovernanceError::DuplicateBallot { .. }));
    }
    let p = env.engine.proposal(id).unwrap();
    assert_eq!(p.for_votes, StakeAmount::new(15_000));
    assert_eq!(p.against_votes, StakeAmount::ZERO);
}

#[test]
fn weight_is_fixed_at_the_block_before_opening() {
    let (env, _) = env();
    give_weight(&env, "alice", 15_000);
    let id = env
        .engine
        .propose(&account("proposer"), &set_target(1), "snapshot")
        .unwrap();

    // Weight moves after the window opened; the ballot must not see it.
    env.ledger
        .set_weight(&account("alice"), BlockHeight::new(START), 1_000_000);
    env.clock.advance(5);
    env.engine.vote(&account("alice"), id, true).unwrap();

    assert_eq!(
        env.engine.proposal(id).unwrap().for_votes,
        StakeAmount::new(15_000)
    );
}

#[test]
fn zero_weight_voter_rejected_without_ballot() {
    let (env, _) = env();
    let id = env
        .engine
        .propose(&account("proposer"), &set_target(1), "empty")
        .unwrap();
    let err = env.engine.vote(&account("nobody"), id, true).unwrap_err();
    assert!(matches!(err, GovernanceError::NoVotingPower(_)));
    assert!(!env.engine.has_voted(id, &account("nobody")).unwrap());
}

#[test]
fn proposer_balance_below_threshold_rejected() {
    let (env, _) = env();
    env.ledger.set_balance(&account("poor"), 9_999);
    let err = env
        .engine
        .propose(&account("poor"), &set_target(1), "nope")
        .unwrap_err();
    assert!(matches!(err, GovernanceError::InsufficientStake { .. }));
    assert_eq!(env.engine.proposal_count().unwrap(), 0);
    assert!(env.events().is_empty());
}

#[test]
fn events_follow_the_lifecycle() {
    let (env, _) = env();
    give_weight(&env, "alice", 25_000);
    let id = env
        .engine
        .propose(&account("proposer"), &set_target(1), "events")
        .unwrap();
    env.engine.vote(&account("alice"), id, true).unwrap();
    env.skip_to_executable();
    env.engine.execute(id).unwrap();

    assert_eq!(
        env.events(),
        vec![
            GovernanceEvent::ProposalCreated {
                id,
                proposer: account("proposer"),
                start_block: BlockHeight::new(START),
                end_block: BlockHeight::new(START + VOTING_PERIOD),
            },
            GovernanceEvent::VoteCast {
                voter: account("alice"),
                proposal: id,
                support: true,
                weight: StakeAmount::new(25_000),
            },
            GovernanceEvent::ProposalExecuted { id },
        ]
    );
}

#[test]
fn failed_operations_emit_nothing() {
    let (env, _) = env();
    give_weight(&env, "alice", 25_000);
    let id = env
        .engine
        .propose(&account("proposer"), &set_target(1), "quiet")
        .unwrap();
    let before = env.events().len();

    assert!(env.engine.execute(id).is_err());
    env.engine.vote(&account("alice"), id, true).unwrap();
    assert!(env.engine.vote(&account("alice"), id, true).is_err());
    assert_eq!(env.events().len(), before + 1);
}
