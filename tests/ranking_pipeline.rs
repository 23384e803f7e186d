//! End-to-end: week documents on disk -> harvest -> ranked punts.

use std::path::PathBuf;
use std::sync::Arc;
use surrender_index::engine::{rank, rank_parallel, rank_with_policy, ErrorPolicy, VocabularyClassifier};
use surrender_index::feed::file::FilePlayFeed;
use surrender_index::harvest::{harvest, DateRange};
use surrender_index::report::build_rows;

const WEEK_ONE: &str = r#"{
  "games": [
    {
      "gamekey": "100",
      "date": "2017-09-10",
      "home": "MIA",
      "away": "NYJ",
      "drives": [
        {
          "drive_id": 1,
          "posteam": "MIA",
          "plays": [
            {"play_id": 1, "desc": "(14:00) J.Ajayi left end for 75 yards, TOUCHDOWN.", "yrdln": "MIA 25", "ydstogo": 10, "qtr": 1, "time": "14:00", "posteam": "MIA"},
            {"play_id": 2, "desc": "C.Parkey extra point is GOOD.", "yrdln": "NYJ 15", "ydstogo": 0, "qtr": 1, "time": "13:51", "posteam": "MIA"}
          ]
        },
        {
          "drive_id": 2,
          "posteam": "NYJ",
          "plays": [
            {"play_id": 3, "desc": "(2:10) L.Edwards punts 38 yards to MIA 7.", "yrdln": "MIA 45", "ydstogo": 2, "qtr": 4, "time": "02:10", "posteam": "NYJ"}
          ]
        },
        {
          "drive_id": 3,
          "posteam": "MIA",
          "plays": [
            {"play_id": 4, "desc": "(1:02) M.Haack punts 50 yards to NYJ 20.", "yrdln": "MIA 30", "ydstogo": 12, "qtr": 4, "time": "01:02", "posteam": "MIA"}
          ]
        }
      ]
    },
    {
      "gamekey": "101",
      "date": "2017-09-10",
      "home": "DEN",
      "away": "LAC",
      "drives": [
        {
          "drive_id": 1,
          "posteam": "LAC",
          "plays": [
            {"play_id": 9, "desc": "(8:00) D.Kaser punts 41 yards to DEN 19.", "yrdln": "LAC 40", "ydstogo": 4, "qtr": 2, "time": "08:00", "posteam": "LAC"},
            {"play_id": 10, "desc": "(6:00) D.Kaser punts 30 yards, clock garbled.", "yrdln": "LAC 20", "ydstogo": 4, "qtr": 2, "time": "6m", "posteam": "LAC"}
          ]
        }
      ]
    }
  ]
}"#;

fn fixture_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("surrender-index-{}-{}", tag, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(dir.join("2017")).unwrap();
    std::fs::write(dir.join("2017").join("week01.json"), WEEK_ONE).unwrap();
    dir
}

#[tokio::test]
async fn test_pipeline_ranks_desperate_punt_first() {
    let dir = fixture_dir("desperate");
    let feed = FilePlayFeed::new(&dir);
    let harvested = harvest(&feed, 2017..=2017, 1..=2, DateRange::default(), "punts").await;

    // Week 2 has no document on disk.
    assert_eq!(harvested.failures.len(), 1);
    assert_eq!(harvested.failures[0].week, 2);
    assert_eq!(harvested.punts.len(), 4);

    let classifier = VocabularyClassifier::default();
    let outcome = rank_with_policy(&harvested.punts, &classifier, ErrorPolicy::Skip).unwrap();
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].play.play().play_id, "10");

    let ids: Vec<_> = outcome.ranked.iter().map(|r| r.play.play().play_id.as_str()).collect();
    // NYJ down 7 at the MIA 45 on 4th and 2 with 2:10 left dwarfs the rest.
    assert_eq!(ids, ["3", "9", "4"]);

    let top = &outcome.ranked[0];
    let expected = 1.1_f64.powi(10) * 1.2_f64.powi(5) * 0.8 * 4.0 * ((1030.0_f64 * 0.001).powi(3) + 1.0);
    assert!((top.index - expected).abs() < 1e-9);
    assert_eq!(top.breakdown.score_differential, -7);

    let rows = build_rows(&outcome.ranked, 2);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].matchup, "NYJ @ MIA");

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_pipeline_parallel_and_repeatable() {
    let dir = fixture_dir("repeatable");
    let feed = FilePlayFeed::new(&dir);
    let harvested = harvest(&feed, 2017..=2017, 1..=1, DateRange::default(), "punts").await;
    let _ = std::fs::remove_dir_all(&dir);

    let classifier = Arc::new(VocabularyClassifier::default());
    let first = rank_with_policy(&harvested.punts, classifier.as_ref(), ErrorPolicy::Skip).unwrap();
    let second = rank_with_policy(&harvested.punts, classifier.as_ref(), ErrorPolicy::Skip).unwrap();
    let parallel = rank_parallel(harvested.punts.clone(), classifier, ErrorPolicy::Skip)
        .await
        .unwrap();

    for other in [&second, &parallel] {
        assert_eq!(first.ranked.len(), other.ranked.len());
        for (a, b) in first.ranked.iter().zip(&other.ranked) {
            assert!(a.play.same_play(&b.play));
            assert_eq!(a.index.to_bits(), b.index.to_bits());
        }
    }
}

#[tokio::test]
async fn test_pipeline_abort_surfaces_parse_error() {
    let dir = fixture_dir("abort");
    let feed = FilePlayFeed::new(&dir);
    let harvested = harvest(&feed, 2017..=2017, 1..=1, DateRange::default(), "punts").await;
    let _ = std::fs::remove_dir_all(&dir);

    let err = rank(&harvested.punts, &VocabularyClassifier::default()).unwrap_err();
    assert!(err.is_parse_error());
}

#[tokio::test]
async fn test_date_range_excludes_games() {
    let dir = fixture_dir("dates");
    let feed = FilePlayFeed::new(&dir);
    let dates = DateRange::new(chrono::NaiveDate::from_ymd_opt(2017, 9, 11), None);
    let harvested = harvest(&feed, 2017..=2017, 1..=1, dates, "punts").await;
    let _ = std::fs::remove_dir_all(&dir);

    assert!(harvested.games.is_empty());
    assert!(harvested.punts.is_empty());
}
