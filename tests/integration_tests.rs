use anyhow::Result;
use clap::Parser;
use movie_stats::core::Pipeline;
use movie_stats::{
    ChartEngine, ChartError, CliConfig, LanguageChartPipeline, LocalStorage, NoopViewer,
};
use std::path::Path;
use tempfile::TempDir;

fn write_json(dir: &Path, relative: &str, value: serde_json::Value) -> Result<()> {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_vec_pretty(&value)?)?;
    Ok(())
}

fn write_movies(dir: &Path, movies: &[serde_json::Value]) -> Result<()> {
    let index: Vec<_> = movies
        .iter()
        .map(|m| serde_json::json!({"id": m["id"], "title": m["title"]}))
        .collect();
    write_json(dir, "movies.json", serde_json::Value::Array(index))?;
    for movie in movies {
        let id = movie["id"].as_str().unwrap();
        write_json(dir, &format!("movies/{}.json", id), movie.clone())?;
    }
    Ok(())
}

fn movie(id: &str, language: &str, meta: i64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": format!("Movie {}", id),
        "genres": ["Drama"],
        "original_language": language,
        "rating": "PG-13",
        "runtime": 120,
        "tokens": ["stori", "friend"],
        "tmdb_score_value": 7.1,
        "tmdb_score_count": 2000,
        "imdb_score_value": 7.4,
        "imdb_score_count": if meta > 0 { 15000 } else { 0 },
        "meta_score_value": 68.0,
        "meta_score_count": meta
    })
}

fn engine(
    dir: &TempDir,
    extra_args: &[&str],
) -> ChartEngine<LanguageChartPipeline<LocalStorage, CliConfig, NoopViewer>> {
    let mut args = vec!["movie-stats", "--no-display"];
    args.extend_from_slice(extra_args);
    let mut config = CliConfig::parse_from(args);
    config.load_chart_settings().unwrap();

    let pipeline = LanguageChartPipeline::new(LocalStorage::new(dir.path()), config, NoopViewer);
    ChartEngine::new(pipeline)
}

#[test]
fn test_end_to_end_writes_1920_by_1080_png() -> Result<()> {
    let dir = TempDir::new()?;
    write_movies(
        dir.path(),
        &[movie("a", "en", 5), movie("b", "en", 0), movie("c", "fr", 1)],
    )?;

    let output = engine(&dir, &[]).run()?;

    assert_eq!(output, "languages.png");
    let png = dir.path().join("languages.png");
    assert_eq!(image::image_dimensions(&png)?, (1920, 1080));
    Ok(())
}

#[test]
fn test_scenario_counts_follow_first_seen_order() -> Result<()> {
    let dir = TempDir::new()?;
    write_movies(
        dir.path(),
        &[movie("a", "en", 5), movie("b", "en", 0), movie("c", "fr", 1)],
    )?;

    let engine = engine(&dir, &[]);
    let records = engine.pipeline().extract()?;
    let counts = engine.pipeline().transform(records)?;

    assert_eq!(counts.iter().collect::<Vec<_>>(), vec![("en", 1), ("fr", 1)]);
    Ok(())
}

#[test]
fn test_missing_language_aborts_without_output() -> Result<()> {
    let dir = TempDir::new()?;
    let mut broken = movie("tt0404", "en", 3);
    broken.as_object_mut().unwrap().remove("original_language");
    write_movies(dir.path(), &[movie("a", "en", 1), broken])?;

    let err = engine(&dir, &[]).run().unwrap_err();

    match &err {
        ChartError::MissingFieldError { id, field } => {
            assert_eq!(id, "tt0404");
            assert_eq!(field, "original_language");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_ne!(err.exit_code(), 0);
    assert!(!dir.path().join("languages.png").exists());
    Ok(())
}

#[test]
fn test_no_reviewed_movies_is_empty_input_error() -> Result<()> {
    let dir = TempDir::new()?;
    write_movies(dir.path(), &[movie("a", "en", 0), movie("b", "ja", 0)])?;

    let err = engine(&dir, &[]).run().unwrap_err();

    assert!(matches!(err, ChartError::EmptyInputError));
    assert!(!dir.path().join("languages.png").exists());
    Ok(())
}

#[test]
fn test_missing_index_is_reported() -> Result<()> {
    let dir = TempDir::new()?;

    let err = engine(&dir, &[]).run().unwrap_err();

    assert!(matches!(err, ChartError::IndexReadError { .. }));
    assert!(err.to_string().contains("movies.json"));
    Ok(())
}

#[test]
fn test_missing_record_file_is_reported_by_id() -> Result<()> {
    let dir = TempDir::new()?;
    write_movies(dir.path(), &[movie("a", "en", 1), movie("b", "fr", 2)])?;
    std::fs::remove_file(dir.path().join("movies/b.json"))?;

    let err = engine(&dir, &[]).run().unwrap_err();

    assert!(matches!(err, ChartError::RecordReadError { ref id, .. } if id == "b"));
    Ok(())
}

#[test]
fn test_output_is_overwritten_on_rerun() -> Result<()> {
    let dir = TempDir::new()?;
    write_movies(dir.path(), &[movie("a", "en", 1)])?;
    std::fs::write(dir.path().join("languages.png"), b"stale")?;

    engine(&dir, &[]).run()?;

    let bytes = std::fs::read(dir.path().join("languages.png"))?;
    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    Ok(())
}

#[test]
fn test_custom_paths_and_settings_file() -> Result<()> {
    let dir = TempDir::new()?;
    let movies = [movie("x1", "ko", 2), movie("x2", "ko", 4), movie("x3", "hi", 1)];
    let index: Vec<_> = movies
        .iter()
        .map(|m| serde_json::json!({"id": m["id"]}))
        .collect();
    write_json(dir.path(), "data/index.json", serde_json::Value::Array(index))?;
    for m in &movies {
        write_json(
            dir.path(),
            &format!("data/records/{}.json", m["id"].as_str().unwrap()),
            m.clone(),
        )?;
    }

    let settings = dir.path().join("chart.toml");
    std::fs::write(
        &settings,
        r#"
[figure]
width = 10
height = 5
dpi = 50
title = "Languages"

[axes]
scale = "adaptive"
"#,
    )?;

    let output = engine(
        &dir,
        &[
            "--index",
            "data/index.json",
            "--records-dir",
            "data/records",
            "--output",
            "charts/langs.png",
            "--config",
            settings.to_str().unwrap(),
        ],
    )
    .run()?;

    assert_eq!(output, "charts/langs.png");
    assert_eq!(
        image::image_dimensions(dir.path().join("charts/langs.png"))?,
        (500, 250)
    );
    Ok(())
}
