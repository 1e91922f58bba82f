//! End-to-end super-match runs over on-disk chunk layouts.

use std::fs;

use super_match::{BAD_PROBABILITY_THRESHOLD, SuperMatch, SuperMatchError};

use crate::utils::{
    CatalogueContribution, ChunkFixture, assert_close, fixture_config, random_fixture,
    read_output, write_chunk, write_file,
};

fn contribution(ids: &[Option<&str>], probabilities: &[f64]) -> CatalogueContribution {
    CatalogueContribution {
        secondary_ids: ids.iter().map(|id| id.map(str::to_string)).collect(),
        probabilities: probabilities.to_vec(),
    }
}

#[test]
fn test_good_run() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = random_fixture(dir.path(), 3, 5478345, 2);

    let summary = SuperMatch::new(fixture.config.clone()).unwrap().run().unwrap();
    assert_eq!(summary.chunks, 3);
    assert_eq!(
        summary.rows,
        fixture.chunks.iter().map(|c| c.primary_ids.len()).sum::<usize>()
    );

    for chunk in &fixture.chunks {
        let path = fixture.output_path(&chunk.chunk_id);
        assert!(path.exists(), "missing {}", path.display());

        let rows = read_output(&path);
        assert_eq!(rows.len(), chunk.primary_ids.len());

        for (j, row) in rows.iter().enumerate() {
            assert_eq!(row.primary_id, chunk.primary_ids[j]);
            for (c, contribution) in chunk.contributions.iter().enumerate() {
                let expected = contribution.secondary_ids[j].as_deref().unwrap_or("N/A");
                assert_eq!(row.secondary_ids[c], expected);
            }

            let probabilities = chunk
                .contributions
                .iter()
                .map(|c| c.probabilities[j])
                .collect::<Vec<_>>();
            assert_close(row.probability, probabilities.iter().product());

            if row.worst_catalogue == "N/A" {
                assert_close(row.probability_excluding_worst, row.probability);
            } else {
                let worst = if row.worst_catalogue == "A" { 0 } else { 1 };
                assert!(probabilities[worst] < BAD_PROBABILITY_THRESHOLD);
                assert_close(
                    row.probability_excluding_worst * probabilities[worst],
                    row.probability,
                );
            }

            if probabilities.iter().all(|p| *p >= BAD_PROBABILITY_THRESHOLD) {
                assert_eq!(row.worst_catalogue, "N/A");
            }
        }
    }
}

#[test]
fn test_three_source_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture_config(dir.path(), &["A", "B"], 1);
    write_chunk(
        &config,
        &ChunkFixture {
            chunk_id: "chunk_0".to_string(),
            primary_ids: vec!["P1".into(), "P2".into(), "P3".into()],
            contributions: vec![
                contribution(&[Some("A1"), Some("A2"), None], &[0.9, 0.3, 0.6]),
                contribution(&[Some("B1"), None, None], &[0.8, 0.7, 0.4]),
            ],
        },
    );

    SuperMatch::new(config.clone()).unwrap().run().unwrap();
    let rows = read_output(
        &config
            .super_match_save_folder
            .join("chunk_0")
            .join("primary_cat_super_match.csv"),
    );

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].secondary_ids, vec!["A1", "B1"]);
    assert_close(rows[0].probability, 0.72);
    assert_eq!(rows[0].worst_catalogue, "N/A");
    assert_close(rows[0].probability_excluding_worst, 0.72);

    assert_eq!(rows[1].secondary_ids, vec!["A2", "N/A"]);
    assert_close(rows[1].probability, 0.21);
    assert_eq!(rows[1].worst_catalogue, "A");
    assert_close(rows[1].probability_excluding_worst, 0.7);

    assert_eq!(rows[2].secondary_ids, vec!["N/A", "N/A"]);
    assert_close(rows[2].probability, 0.24);
    assert_eq!(rows[2].worst_catalogue, "B");
    assert_close(rows[2].probability_excluding_worst, 0.6);
}

#[test]
fn test_catalogue_order_only_changes_tie_breaks() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = random_fixture(dir.path(), 2, 99, 2);
    SuperMatch::new(fixture.config.clone()).unwrap().run().unwrap();

    let mut reversed = fixture.config.clone();
    reversed.catalogues.reverse();
    reversed.super_match_save_folder = dir.path().join("reversed");
    SuperMatch::new(reversed.clone()).unwrap().run().unwrap();

    for chunk in &fixture.chunks {
        let forward = read_output(&fixture.output_path(&chunk.chunk_id));
        let backward = read_output(
            &reversed
                .super_match_save_folder
                .join(&chunk.chunk_id)
                .join("primary_cat_super_match.csv"),
        );
        assert_eq!(forward.len(), backward.len());
        for (f, b) in forward.iter().zip(&backward) {
            assert_eq!(f.primary_id, b.primary_id);
            assert_eq!(f.secondary_ids[0], b.secondary_ids[1]);
            assert_eq!(f.secondary_ids[1], b.secondary_ids[0]);
            assert_close(f.probability, b.probability);
        }
    }
}

#[test]
fn test_rerun_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = random_fixture(dir.path(), 2, 7, 2);
    let super_match = SuperMatch::new(fixture.config.clone()).unwrap();

    super_match.run().unwrap();
    let first = fixture
        .chunks
        .iter()
        .map(|c| fs::read(fixture.output_path(&c.chunk_id)).unwrap())
        .collect::<Vec<_>>();

    super_match.run().unwrap();
    for (chunk, before) in fixture.chunks.iter().zip(first) {
        assert_eq!(fs::read(fixture.output_path(&chunk.chunk_id)).unwrap(), before);
    }
}

#[test]
fn test_unknown_id_fails_only_its_chunk() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = random_fixture(dir.path(), 2, 11, 2);

    // chunk_1's catalogue A now references a primary ID the chunk never had
    let bad_matches = fixture
        .config
        .top_level_folder
        .join("cm_A")
        .join("chunk_1")
        .join("matches.csv");
    let mut content = fs::read_to_string(&bad_matches).unwrap();
    content.push_str("ID_missing,J_1,0.9\n");
    write_file(&bad_matches, &content);

    let super_match = SuperMatch::new(fixture.config.clone()).unwrap();
    let err = super_match.run().unwrap_err();
    assert_eq!(err.chunk(), Some("chunk_1"));
    assert_eq!(err.catalogue(), Some("A"));
    assert!(matches!(
        err.root_cause(),
        SuperMatchError::UnknownId { id, .. } if id == "ID_missing"
    ));
    assert!(!fixture.output_path("chunk_1").exists());

    // The sibling chunk is unaffected
    let tasks = super_match.tasks().unwrap();
    let outcome = SuperMatch::run_chunk(&tasks[0]).unwrap();
    assert_eq!(outcome.chunk_id, "chunk_0");
    assert_eq!(outcome.rows, fixture.chunks[0].primary_ids.len());
    assert_eq!(
        read_output(&fixture.output_path("chunk_0")).len(),
        fixture.chunks[0].primary_ids.len()
    );
}

#[test]
fn test_missing_non_match_file() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = random_fixture(dir.path(), 1, 3, 1);
    fs::remove_file(
        fixture
            .config
            .top_level_folder
            .join("cm_B")
            .join("chunk_0")
            .join("non_matches.csv"),
    )
    .unwrap();

    let err = SuperMatch::new(fixture.config.clone())
        .unwrap()
        .run()
        .unwrap_err();
    assert_eq!(err.kind(), "worker task");
    assert_eq!(err.root_cause().kind(), "missing file");
}

#[test]
fn test_column_index_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let mut fixture = random_fixture(dir.path(), 1, 4, 1);
    fixture.config.primary_catalogue_input_column_id = 5;

    let err = SuperMatch::new(fixture.config.clone())
        .unwrap()
        .run()
        .unwrap_err();
    assert!(matches!(
        err.root_cause(),
        SuperMatchError::ColumnIndex { column: 5, width: 2, .. }
    ));
}

#[test]
fn test_no_chunks() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture_config(dir.path(), &["A"], 2);
    fs::create_dir_all(&config.primary_catalogue_input_location).unwrap();

    let summary = SuperMatch::new(config).unwrap().run().unwrap();
    assert_eq!(summary.chunks, 0);
    assert_eq!(summary.rows, 0);
}
