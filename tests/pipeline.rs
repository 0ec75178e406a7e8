//! End-to-end pipeline runs against real files in a temp directory.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use simnet::pipeline::{run, PipelineConfig};
use simnet::render::{LayoutOptions, RenderOptions};

/// Two well-separated triangles plus noise that every filter should drop:
/// a low-score pair, a low-coverage pair, a self-hit, and a short line.
const HITS: &str = "\
a1\ta2\t0.8\t1.0\t1.0
a2\ta3\t0.8\t1.0\t1.0
a1\ta3\t0.8\t1.0\t1.0
b1\tb2\t0.7\t1.0\t1.0
b2\tb3\t0.7\t1.0\t1.0
b1\tb3\t0.7\t1.0\t1.0
a1\tb1\t0.1\t1.0\t1.0
a2\tb2\t0.9\t0.3\t1.0
a3\ta3\t0.99\t1.0\t1.0
junk\tline
";

fn small_render() -> RenderOptions {
    RenderOptions {
        width: 160,
        height: 160,
        node_radius: 5.0,
        label_font_scale: 1,
        layout: LayoutOptions::default(),
    }
}

fn config(hits: &Path, out: &Path, thresholds: Vec<f64>, labels: Option<&Path>) -> PipelineConfig {
    PipelineConfig {
        hits_path: hits.to_path_buf(),
        output_dir: out.to_path_buf(),
        thresholds,
        coverage: 0.9,
        label_path: labels.map(Path::to_path_buf),
        render: small_render(),
    }
}

fn members_by_community(table: &str) -> HashMap<usize, Vec<String>> {
    let mut map: HashMap<usize, Vec<String>> = HashMap::new();
    for line in table.lines().skip(1) {
        let mut fields = line.split('\t');
        let community: usize = fields.next().unwrap().parse().unwrap();
        let protein = fields.next().unwrap().to_string();
        map.entry(community).or_default().push(protein);
    }
    map
}

#[test]
fn test_full_run_two_thresholds() {
    let dir = tempfile::tempdir().unwrap();
    let hits = dir.path().join("result.tsv");
    fs::write(&hits, HITS).unwrap();
    let labels = dir.path().join("labels.tsv");
    fs::write(&labels, "a1\tToxin\tblue\t600\nghost\tMissing\n").unwrap();
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();

    run(&config(&hits, &out, vec![0.5, 0.75], Some(&labels))).unwrap();

    for t in ["0.5", "0.75"] {
        for name in [
            format!("community_members_threshold_{t}.tsv"),
            format!("community_counts_threshold_{t}.tsv"),
            format!("community_threshold_{t}.txt"),
            format!("protein_similarity_network_clusters_threshold_{t}.png"),
        ] {
            assert!(out.join(&name).exists(), "missing {name}");
        }
    }

    // Threshold 0.5 keeps both triangles as separate communities.
    let members =
        fs::read_to_string(out.join("community_members_threshold_0.5.tsv")).unwrap();
    let by_community = members_by_community(&members);
    assert_eq!(by_community.len(), 2);
    assert_eq!(by_community[&0], vec!["a1", "a2", "a3"]);
    assert_eq!(by_community[&1], vec!["b1", "b2", "b3"]);

    let counts = fs::read_to_string(out.join("community_counts_threshold_0.5.tsv")).unwrap();
    assert_eq!(counts, "Community\tMemberCount\n0\t3\n1\t3\n");

    let note = fs::read_to_string(out.join("community_threshold_0.5.txt")).unwrap();
    assert_eq!(note, "Threshold used for community detection: 0.5\n");

    // Threshold 0.75 drops the 0.7-score triangle entirely.
    let members =
        fs::read_to_string(out.join("community_members_threshold_0.75.tsv")).unwrap();
    let by_community = members_by_community(&members);
    assert_eq!(by_community.len(), 1);
    assert_eq!(by_community[&0], vec!["a1", "a2", "a3"]);
}

#[test]
fn test_counts_sum_matches_membership() {
    let dir = tempfile::tempdir().unwrap();
    let hits = dir.path().join("result.tsv");
    fs::write(&hits, HITS).unwrap();
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();

    run(&config(&hits, &out, vec![0.5], None)).unwrap();

    let members =
        fs::read_to_string(out.join("community_members_threshold_0.5.tsv")).unwrap();
    let counts = fs::read_to_string(out.join("community_counts_threshold_0.5.tsv")).unwrap();

    let membership_rows = members.lines().skip(1).count();
    let count_sum: usize = counts
        .lines()
        .skip(1)
        .map(|l| l.split('\t').nth(1).unwrap().parse::<usize>().unwrap())
        .sum();
    assert_eq!(membership_rows, count_sum);

    let distinct: std::collections::HashSet<&str> = members
        .lines()
        .skip(1)
        .map(|l| l.split('\t').nth(1).unwrap())
        .collect();
    assert_eq!(distinct.len(), membership_rows);
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let hits = dir.path().join("result.tsv");
    fs::write(&hits, HITS).unwrap();

    let first = dir.path().join("first");
    let second = dir.path().join("second");
    fs::create_dir_all(&first).unwrap();
    fs::create_dir_all(&second).unwrap();

    run(&config(&hits, &first, vec![0.5], None)).unwrap();
    run(&config(&hits, &second, vec![0.5], None)).unwrap();

    for name in [
        "community_members_threshold_0.5.tsv",
        "community_counts_threshold_0.5.tsv",
        "community_threshold_0.5.txt",
        "protein_similarity_network_clusters_threshold_0.5.png",
    ] {
        let a = fs::read(first.join(name)).unwrap();
        let b = fs::read(second.join(name)).unwrap();
        assert_eq!(a, b, "{name} differs between identical runs");
    }
}

#[test]
fn test_self_pair_only_yields_empty_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let hits = dir.path().join("result.tsv");
    fs::write(&hits, "p1\tp1\t0.99\t1.0\t1.0\n").unwrap();
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();

    run(&config(&hits, &out, vec![0.5], None)).unwrap();

    let members =
        fs::read_to_string(out.join("community_members_threshold_0.5.tsv")).unwrap();
    assert_eq!(members, "Community\tProtein\n");
    let counts = fs::read_to_string(out.join("community_counts_threshold_0.5.tsv")).unwrap();
    assert_eq!(counts, "Community\tMemberCount\n");
    assert!(out
        .join("protein_similarity_network_clusters_threshold_0.5.png")
        .exists());
}

#[test]
fn test_missing_hits_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();

    let err = run(&config(
        &dir.path().join("absent.tsv"),
        &out,
        vec![0.5],
        None,
    ))
    .unwrap_err();

    assert!(matches!(
        err,
        simnet::Error::MissingCollaboratorOutput { .. }
    ));
}

#[test]
fn test_malformed_hits_abort_before_any_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let hits = dir.path().join("result.tsv");
    fs::write(&hits, "p1\tp2\tnot-a-score\t1.0\t1.0\n").unwrap();
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();

    let err = run(&config(&hits, &out, vec![0.5], None)).unwrap_err();

    assert!(matches!(err, simnet::Error::MalformedRecord { .. }));
    assert!(fs::read_dir(&out).unwrap().next().is_none());
}
