//! Integration tests for the safe mutation orchestrator
//!
//! These verify the core invariant end to end against a mocked API surface:
//! no removal call is ever issued unless the recovery snapshot's count was
//! confirmed, and per-scope failures never abort sibling scopes.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use mockall::Sequence;

use common::{api_error, test_playlist, test_user, MockSpotifyApi};
use core_cleanup::{
    CleanupConfig, CleanupError, CleanupOrchestrator, CleanupPlan, DuplicateCleanupPlan,
    FailureScope, PlaylistRemoval,
};
use core_duplicates::{RemovalPlan, ScanSource};
use provider_spotify::PositionedRemoval;

fn fast_config() -> CleanupConfig {
    CleanupConfig {
        verify_delay: Duration::from_millis(1),
        ..CleanupConfig::default()
    }
}

fn uris(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("spotify:track:t{}", i)).collect()
}

fn ids(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("t{}", i)).collect()
}

#[tokio::test]
async fn test_snapshot_and_verify_precede_any_mutation() {
    let mut mock = MockSpotifyApi::new();
    let mut seq = Sequence::new();

    mock.expect_current_user()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(test_user()));
    mock.expect_create_playlist()
        .times(1)
        .in_sequence(&mut seq)
        .withf(|_, user_id, name, _| {
            user_id == "me" && name.starts_with("Removed by Spotify Cleanup Tool — Duplicates")
        })
        .returning(|_, _, name, _| Ok(test_playlist("archive", name)));
    mock.expect_add_tracks_to_playlist()
        .times(1)
        .in_sequence(&mut seq)
        .withf(|_, playlist_id, uris| playlist_id == "archive" && uris.len() == 40)
        .returning(|_, _, _| Ok(()));
    mock.expect_playlist_track_total()
        .times(1)
        .in_sequence(&mut seq)
        .withf(|_, playlist_id| playlist_id == "archive")
        .returning(|_, _| Ok(40));
    mock.expect_remove_saved_tracks()
        .times(1)
        .in_sequence(&mut seq)
        .withf(|_, track_ids| track_ids.len() == 40)
        .returning(|_, _| Ok(()));

    let plan = DuplicateCleanupPlan {
        source: ScanSource::Liked,
        plan: RemovalPlan {
            liked_track_ids: ids(40),
            removed_track_uris: uris(40),
            ..RemovalPlan::default()
        },
    };

    let orchestrator = CleanupOrchestrator::with_config(Arc::new(mock), fast_config());
    let report = orchestrator
        .execute_duplicate_cleanup("token", &plan)
        .await
        .unwrap();

    assert_eq!(report.removed_from_liked, 40);
    assert_eq!(report.removed_tracks, 40);
    assert!(report.archive_playlist.is_some());
    assert!(report.is_full_success());
}

#[tokio::test]
async fn test_failed_verification_issues_zero_mutations() {
    let mut mock = MockSpotifyApi::new();

    mock.expect_current_user().times(1).returning(|_| Ok(test_user()));
    mock.expect_create_playlist()
        .times(1)
        .returning(|_, _, name, _| Ok(test_playlist("archive", name)));
    mock.expect_add_tracks_to_playlist()
        .times(1)
        .returning(|_, _, _| Ok(()));

    // Polls never reach the expected 10
    let polls = AtomicUsize::new(0);
    mock.expect_playlist_track_total()
        .times(3)
        .returning(move |_, _| {
            let poll = polls.fetch_add(1, Ordering::SeqCst);
            Ok([3u64, 7, 7][poll])
        });

    mock.expect_remove_saved_tracks().never();
    mock.expect_remove_playlist_tracks().never();
    mock.expect_remove_playlist_occurrences().never();

    let plan = DuplicateCleanupPlan {
        source: ScanSource::Liked,
        plan: RemovalPlan {
            liked_track_ids: ids(10),
            removed_track_uris: uris(10),
            ..RemovalPlan::default()
        },
    };

    let orchestrator = CleanupOrchestrator::with_config(Arc::new(mock), fast_config());
    let result = orchestrator.execute_duplicate_cleanup("token", &plan).await;

    match result {
        Err(CleanupError::Verification { expected, observed }) => {
            assert_eq!(expected, 10);
            assert_eq!(observed, 7);
        }
        other => panic!("expected verification failure, got {:?}", other.is_ok()),
    }
}

#[tokio::test]
async fn test_verification_succeeds_on_a_later_poll() {
    let mut mock = MockSpotifyApi::new();

    mock.expect_current_user().times(1).returning(|_| Ok(test_user()));
    mock.expect_create_playlist()
        .times(1)
        .returning(|_, _, name, _| Ok(test_playlist("archive", name)));
    mock.expect_add_tracks_to_playlist()
        .times(1)
        .returning(|_, _, _| Ok(()));

    let polls = AtomicUsize::new(0);
    mock.expect_playlist_track_total()
        .times(2)
        .returning(move |_, _| {
            let poll = polls.fetch_add(1, Ordering::SeqCst);
            Ok([3u64, 10][poll])
        });

    mock.expect_remove_saved_tracks()
        .times(1)
        .returning(|_, _| Ok(()));

    let plan = DuplicateCleanupPlan {
        source: ScanSource::Liked,
        plan: RemovalPlan {
            liked_track_ids: ids(10),
            removed_track_uris: uris(10),
            ..RemovalPlan::default()
        },
    };

    let orchestrator = CleanupOrchestrator::with_config(Arc::new(mock), fast_config());
    let report = orchestrator
        .execute_duplicate_cleanup("token", &plan)
        .await
        .unwrap();

    assert_eq!(report.removed_from_liked, 10);
}

#[tokio::test]
async fn test_empty_plan_skips_snapshot_and_verification() {
    let mut mock = MockSpotifyApi::new();

    mock.expect_current_user().never();
    mock.expect_create_playlist().never();
    mock.expect_add_tracks_to_playlist().never();
    mock.expect_playlist_track_total().never();
    mock.expect_remove_saved_tracks().never();
    mock.expect_remove_playlist_tracks().never();

    let orchestrator = CleanupOrchestrator::with_config(Arc::new(mock), fast_config());
    let report = orchestrator
        .execute_cleanup("token", &CleanupPlan::default())
        .await
        .unwrap();

    assert_eq!(report.removed_tracks, 0);
    assert_eq!(report.removed_from_liked, 0);
    assert_eq!(report.playlists_updated, 0);
    assert!(report.archive_playlist.is_none());
    assert!(report.is_full_success());
}

#[tokio::test]
async fn test_scope_failure_does_not_block_sibling_scopes() {
    let mut mock = MockSpotifyApi::new();

    mock.expect_current_user().times(1).returning(|_| Ok(test_user()));
    mock.expect_create_playlist()
        .times(1)
        .withf(|_, _, name, _| {
            // Artist cleanup archives are not labeled as duplicate runs
            name.starts_with("Removed by Spotify Cleanup Tool — 2")
        })
        .returning(|_, _, name, _| Ok(test_playlist("archive", name)));
    mock.expect_add_tracks_to_playlist()
        .times(1)
        .returning(|_, _, _| Ok(()));
    mock.expect_playlist_track_total()
        .times(1)
        .returning(|_, _| Ok(3));

    mock.expect_remove_playlist_tracks()
        .times(2)
        .returning(|_, playlist_id, _| {
            if playlist_id == "pl1" {
                Err(api_error())
            } else {
                Ok(())
            }
        });
    mock.expect_remove_saved_tracks()
        .times(1)
        .returning(|_, _| Ok(()));

    let plan = CleanupPlan {
        liked_track_ids: ids(2),
        playlist_removals: vec![
            PlaylistRemoval {
                playlist_id: "pl1".to_string(),
                uris: uris(2),
            },
            PlaylistRemoval {
                playlist_id: "pl2".to_string(),
                uris: uris(1),
            },
        ],
        removed_track_uris: uris(3),
    };

    let orchestrator = CleanupOrchestrator::with_config(Arc::new(mock), fast_config());
    let report = orchestrator.execute_cleanup("token", &plan).await.unwrap();

    // pl1 failed, pl2 and liked still went through
    assert_eq!(report.playlists_updated, 1);
    assert_eq!(report.removed_from_liked, 2);
    assert_eq!(report.removed_tracks, 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].scope, FailureScope::Playlist);
    assert_eq!(report.failures[0].id.as_deref(), Some("pl1"));
    assert!(!report.is_full_success());
}

#[tokio::test]
async fn test_duplicate_playlist_run_routes_positions_and_uris() {
    let mut mock = MockSpotifyApi::new();

    mock.expect_current_user().times(1).returning(|_| Ok(test_user()));
    mock.expect_create_playlist()
        .times(1)
        .withf(|_, _, name, _| name.contains("Duplicates — Road Trip"))
        .returning(|_, _, name, _| Ok(test_playlist("archive", name)));
    mock.expect_add_tracks_to_playlist()
        .times(1)
        .returning(|_, _, _| Ok(()));
    mock.expect_playlist_track_total()
        .times(1)
        .returning(|_, _| Ok(2));

    mock.expect_remove_playlist_occurrences()
        .times(1)
        .withf(|_, playlist_id, removals| {
            playlist_id == "pl1"
                && removals.len() == 1
                && removals[0].positions == vec![0, 4]
        })
        .returning(|_, _, _| Ok(()));
    mock.expect_remove_playlist_tracks()
        .times(1)
        .withf(|_, playlist_id, uris| playlist_id == "pl1" && uris.len() == 1)
        .returning(|_, _, _| Ok(()));
    mock.expect_remove_saved_tracks().never();

    let plan = DuplicateCleanupPlan {
        source: ScanSource::Playlist {
            id: "pl1".to_string(),
            name: "Road Trip".to_string(),
        },
        plan: RemovalPlan {
            playlist_track_uris: vec!["spotify:track:b".to_string()],
            playlist_track_positions: vec![PositionedRemoval {
                uri: "spotify:track:a".to_string(),
                positions: vec![0, 4],
            }],
            removed_track_uris: vec![
                "spotify:track:a".to_string(),
                "spotify:track:b".to_string(),
            ],
            ..RemovalPlan::default()
        },
    };

    let orchestrator = CleanupOrchestrator::with_config(Arc::new(mock), fast_config());
    let report = orchestrator
        .execute_duplicate_cleanup("token", &plan)
        .await
        .unwrap();

    // Two positional entries plus one whole uri
    assert_eq!(report.removed_from_playlist, 3);
    assert_eq!(report.removed_tracks, 2);
    assert!(report.is_full_success());
}

#[tokio::test]
async fn test_duplicate_scope_failures_are_recorded_per_call() {
    let mut mock = MockSpotifyApi::new();

    mock.expect_current_user().times(1).returning(|_| Ok(test_user()));
    mock.expect_create_playlist()
        .times(1)
        .returning(|_, _, name, _| Ok(test_playlist("archive", name)));
    mock.expect_add_tracks_to_playlist()
        .times(1)
        .returning(|_, _, _| Ok(()));
    mock.expect_playlist_track_total()
        .times(1)
        .returning(|_, _| Ok(2));

    // Positional removal fails, whole-uri removal still runs and succeeds
    mock.expect_remove_playlist_occurrences()
        .times(1)
        .returning(|_, _, _| Err(api_error()));
    mock.expect_remove_playlist_tracks()
        .times(1)
        .returning(|_, _, _| Ok(()));

    let plan = DuplicateCleanupPlan {
        source: ScanSource::Playlist {
            id: "pl1".to_string(),
            name: "Mix".to_string(),
        },
        plan: RemovalPlan {
            playlist_track_uris: vec!["spotify:track:b".to_string()],
            playlist_track_positions: vec![PositionedRemoval {
                uri: "spotify:track:a".to_string(),
                positions: vec![2],
            }],
            removed_track_uris: vec![
                "spotify:track:a".to_string(),
                "spotify:track:b".to_string(),
            ],
            ..RemovalPlan::default()
        },
    };

    let orchestrator = CleanupOrchestrator::with_config(Arc::new(mock), fast_config());
    let report = orchestrator
        .execute_duplicate_cleanup("token", &plan)
        .await
        .unwrap();

    assert_eq!(report.removed_from_playlist, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].scope, FailureScope::Playlist);
    assert!(report.failures[0].message.contains("positions"));
}

#[tokio::test]
async fn test_snapshot_deduplicates_union_uris() {
    let mut mock = MockSpotifyApi::new();

    mock.expect_current_user().times(1).returning(|_| Ok(test_user()));
    mock.expect_create_playlist()
        .times(1)
        .returning(|_, _, name, _| Ok(test_playlist("archive", name)));
    mock.expect_add_tracks_to_playlist()
        .times(1)
        .withf(|_, _, uris| {
            uris.len() == 2 && uris[0] == "spotify:track:a" && uris[1] == "spotify:track:b"
        })
        .returning(|_, _, _| Ok(()));
    mock.expect_playlist_track_total()
        .times(1)
        .returning(|_, _| Ok(2));
    mock.expect_remove_saved_tracks()
        .times(1)
        .returning(|_, _| Ok(()));

    let plan = DuplicateCleanupPlan {
        source: ScanSource::Liked,
        plan: RemovalPlan {
            liked_track_ids: vec!["a".to_string(), "b".to_string()],
            removed_track_uris: vec![
                "spotify:track:a".to_string(),
                "spotify:track:b".to_string(),
                "spotify:track:a".to_string(),
            ],
            ..RemovalPlan::default()
        },
    };

    let orchestrator = CleanupOrchestrator::with_config(Arc::new(mock), fast_config());
    let report = orchestrator
        .execute_duplicate_cleanup("token", &plan)
        .await
        .unwrap();

    // The duplicated uri counts once
    assert_eq!(report.removed_tracks, 2);
}
