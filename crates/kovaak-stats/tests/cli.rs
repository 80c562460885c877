use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const STAT_FILE: &str = "Kill #,Timestamp,Bot,Weapon,TTK,Shots,Hits,Accuracy,Damage Done,Damage Possible,Efficiency,Cheated
1,12:00:01.000000,Bot,Pistol,0.5s,2,1,0.5,100.0,200.0,0.5,
2,12:00:02.000000,Bot,Pistol,1.0s,1,1,1.0,100.0,100.0,1.0,

Weapon,Shots,Hits,Damage Done,Damage Possible
Pistol,3,2,200.0,300.0

Kills:,2
Deaths:,0
Fight Time:,60.0
Avg TTK:,0.75
Damage Done:,200.0
Damage Taken:,0.0
Score:,SCORE
Game Version:,2.0.1.0

Sens Scale:,cm/360
";

fn write_stat(dir: &Path, scenario: &str, date: &str, score: &str) {
    let name = format!("{scenario} - Challenge - {date} Stats.csv");
    std::fs::write(dir.join(name), STAT_FILE.replace("SCORE", score)).unwrap();
}

fn kovaak_stats(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kovaak-stats"))
        .args(args)
        .env_remove("KOVAAK_STAT_DIR")
        .env_remove("KOVAAK_STAT_IMG_DIR")
        .output()
        .expect("spawn kovaak-stats")
}

#[test]
fn test_missing_statsdir_is_usage_error() {
    let out = kovaak_stats(&["sparky"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("--statsdir"));
    assert!(stderr.contains("KOVAAK_STAT_DIR"));
}

#[test]
fn test_missing_imgdir_is_usage_error() {
    let stats = TempDir::new().unwrap();
    let out = kovaak_stats(&["--statsdir", stats.path().to_str().unwrap(), "charts"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("KOVAAK_STAT_IMG_DIR"));
}

#[test]
fn test_nonexistent_statsdir_fails() {
    let out = kovaak_stats(&["--statsdir", "/tmp/does-not-exist-kovaak-cli", "scenarios"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Stats directory not found"));
}

#[test]
fn test_sparky_report() {
    let stats = TempDir::new().unwrap();
    write_stat(stats.path(), "Popcorn Sparky", "2021.03.14-19.05.42", "700");
    write_stat(stats.path(), "Popcorn Sparky", "2021.03.15-19.05.42", "812");

    let out = kovaak_stats(&["--statsdir", stats.path().to_str().unwrap(), "sparky"]);
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Best:");
    assert_eq!(lines[1], "0.0");
    assert_eq!(lines[2], "812.0");
    assert!(stdout.contains("\n\n5 Most Recent:\n"));
    assert!(stdout.contains("812.0     700.0     0.0       0.0       0.0       \n"));
}

#[test]
fn test_voltaic_json_report() {
    let stats = TempDir::new().unwrap();
    write_stat(stats.path(), "Pasu Voltaic Easy", "2021.03.14-19.05.42", "400");
    write_stat(stats.path(), "Pasu Voltaic Easy", "2021.03.15-19.05.42", "600");

    let out = kovaak_stats(&[
        "--statsdir",
        stats.path().to_str().unwrap(),
        "voltaic",
        "--avg",
        "0",
        "--format",
        "json",
    ]);
    assert!(out.status.success());

    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value[0]["scenario"], "Pasu Voltaic Easy");
    assert_eq!(value[0]["best"], 600.0);
    assert_eq!(value[0]["average"], 500.0);
}

#[test]
fn test_report_aborts_on_malformed_roster_file() {
    let stats = TempDir::new().unwrap();
    std::fs::write(
        stats
            .path()
            .join("Popcorn Sparky - Challenge - 2021.03.14-19.05.42 Stats.csv"),
        "not a stat file",
    )
    .unwrap();

    let out = kovaak_stats(&["--statsdir", stats.path().to_str().unwrap(), "sparky"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Popcorn Sparky"));
}

#[test]
fn test_scenarios_listing() {
    let stats = TempDir::new().unwrap();
    write_stat(stats.path(), "Air Dodge", "2021.03.14-19.05.42", "1");
    write_stat(stats.path(), "Air Dodge", "2021.03.15-19.05.42", "2");
    write_stat(stats.path(), "Popcorn Sparky", "2021.03.14-19.05.42", "3");
    std::fs::write(stats.path().join("notes.txt"), "x").unwrap();

    let out = kovaak_stats(&["--statsdir", stats.path().to_str().unwrap(), "scenarios"]);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "Air Dodge\t2\nPopcorn Sparky\t1\n"
    );
}

#[test]
fn test_charts_skip_malformed_and_create_imgdir() {
    let stats = TempDir::new().unwrap();
    write_stat(stats.path(), "Air Dodge", "2021.03.14-19.05.42", "640");
    std::fs::write(
        stats
            .path()
            .join("Air Dodge - Challenge - 2021.03.15-19.05.42 Stats.csv"),
        "not a stat file",
    )
    .unwrap();

    let img = TempDir::new().unwrap();
    let img_dir = img.path().join("nested").join("charts");

    let out = kovaak_stats(&[
        "--statsdir",
        stats.path().to_str().unwrap(),
        "charts",
        "--imgdir",
        img_dir.to_str().unwrap(),
    ]);
    assert!(out.status.success());

    let png = img_dir.join("Air Dodge.png");
    let stdout = String::from_utf8_lossy(&out.stdout);
    let saved: Vec<&str> = stdout.lines().filter(|l| l.starts_with("Saved ")).collect();
    assert_eq!(saved, vec![format!("Saved {}", png.display())]);
    assert!(png.is_file());
}
