//! jmigrate - GAME DATA JSON MIGRATOR
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};

use jmigrate::{
    cli::{Args, Command},
    format::{format_recursively, FmtOptions},
    parse::{read_jsons_rec, read_jsons_rec_lenient, SourceEntry},
    rules::legacy_units_schema,
    schema::TypedQuery,
    stats::{Statistics, Timeit},
    transform::{apply_recursively, filter_records, migrate_text, MigrationOutcome},
};

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Migrate {
            paths,
            format,
            quiet,
            dry_run,
            threads,
            verbose,
        } => run_migrate(paths, format, quiet, dry_run, threads, verbose),
        Command::Query {
            paths,
            entry_type,
            id,
            field,
            output,
            quiet,
        } => run_query(paths, entry_type, id, field, output, quiet),
    }
}

/// 마이그레이션 모드 실행
fn run_migrate(
    paths: Vec<PathBuf>,
    format: Option<PathBuf>,
    quiet: bool,
    dry_run: bool,
    threads: Option<usize>,
    verbose: bool,
) -> Result<()> {
    if let Some(threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("스레드 풀 초기화 실패")?;
    }

    if !quiet {
        print_header(&paths, dry_run);
    }

    let timeit = Timeit::new(quiet);

    // 경로 인자 단위로는 빠르게 실패 (개별 파일 실패 격리는 쓰기 단계에서)
    let entries = timeit.run("JSON 읽기", || read_jsons_rec(&paths))?;

    if entries.is_empty() {
        if !quiet {
            println!("{}", "⚠️ 처리할 JSON 파일이 없습니다.".yellow());
        }
        return Ok(());
    }

    if !quiet {
        println!(
            "  {} 발견된 파일 수: {}",
            "📋".bright_white(),
            entries.len().to_string().bright_green()
        );
    }

    if dry_run {
        print_dry_run(&entries);
        return Ok(());
    }

    let stats = Statistics::new(entries.len());
    let pb = create_progress_bar(entries.len(), quiet);
    let schema = legacy_units_schema();

    if !quiet {
        println!("\n{}", "⚡ 병렬 마이그레이션 중...".bright_cyan());
    }

    let report = timeit.run("마이그레이션", || {
        apply_recursively(
            |entry: &SourceEntry| {
                let outcome = migrate_text(&schema, &entry.text, &entry.path);
                if let Ok(MigrationOutcome::Rewritten(ref out)) = outcome {
                    stats.add_bytes_written(out.len() as u64);
                }
                pb.inc(1);
                outcome
            },
            &entries,
        )
    });
    pb.finish_with_message("완료!");

    stats.add_rewritten(report.rewritten.len());
    stats.add_skipped(report.skipped.len());
    stats.add_errors(report.errors.len());

    if !quiet {
        print_skipped(&report.skipped);
    }
    print_errors(&report.errors, verbose);

    // 포매터 실패는 변환 실패가 아님: 로그만 남김
    if let Some(formatter_path) = format {
        let options = FmtOptions {
            formatter_path,
            quiet: !verbose,
        };
        timeit.run("포매팅", || format_recursively(&options, &report.rewritten));
    }

    if !quiet {
        stats.print_migration_summary();
    }

    Ok(())
}

/// 쿼리 모드 실행
fn run_query(
    paths: Vec<PathBuf>,
    entry_type: String,
    id: Option<String>,
    field: Option<String>,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let timeit = Timeit::new(quiet);

    // 쿼리 모드에서는 경로/파싱 실패를 파일 단위로 삼켜 로그만 남김
    let entries = timeit.run("JSON 읽기", || read_jsons_rec_lenient(&paths));

    let schema = TypedQuery::new(entry_type)
        .with_id(id)
        .with_projection(field);

    let queried: Vec<serde_json::Value> = timeit.run("쿼리", || {
        entries
            .iter()
            .flat_map(|entry| match filter_records(&schema, &entry.text, &entry.path) {
                Ok(found) => found,
                Err(e) => {
                    println!("{} {}", "ERROR".on_red().bright_white(), e);
                    Vec::new()
                }
            })
            .collect()
    });

    if queried.is_empty() {
        println!("매칭되는 엔트리가 없습니다.");
        return Ok(());
    }

    output_to(&timeit, &queried, output.as_deref())
}

/// 결과를 stdout 또는 파일로 출력
///
/// 결과가 단일 문자열이면 JSON으로 감싸지 않고 원문 그대로 내보냄
fn output_to(timeit: &Timeit, data: &[serde_json::Value], path: Option<&Path>) -> Result<()> {
    let text = match data {
        [serde_json::Value::String(s)] => s.clone(),
        _ => serde_json::to_string_pretty(data)?,
    };

    match path {
        None => println!("{}", text),
        Some(path) => {
            let name = format!("{}개 엔트리를 {} 에 기록", data.len(), path.display());
            timeit.run(&name, || fs::write(path, text))?;
        }
    }

    Ok(())
}

/// 헤더 출력
fn print_header(paths: &[PathBuf], dry_run: bool) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!("{}", " 🚀 GAME DATA JSON MIGRATOR".bright_white().bold());
    println!("{}", "═".repeat(50).bright_blue());

    for path in paths {
        println!("  {} 입력 경로: {:?}", "📂".bright_cyan(), path);
    }

    if dry_run {
        println!(
            "  {} {}",
            "⚠️".bright_yellow(),
            "드라이런 모드 (실제 쓰기 없음)".yellow()
        );
    }

    println!("{}", "═".repeat(50).bright_blue());
    println!("\n{}", "📁 파일 검색 중...".bright_cyan());
}

/// 드라이런 출력
fn print_dry_run(entries: &[SourceEntry]) {
    println!("\n{}", "📋 처리 예정 파일 목록:".bright_cyan());
    for (i, entry) in entries.iter().enumerate() {
        println!("  {}. {:?}", i + 1, entry.path);
    }
    println!(
        "\n{} 총 {} 개의 파일이 처리될 예정입니다.",
        "ℹ️".bright_blue(),
        entries.len().to_string().bright_green()
    );
}

/// 건너뛴 파일 목록 출력
fn print_skipped(skipped: &[PathBuf]) {
    if skipped.is_empty() {
        return;
    }

    println!(
        "\n{}",
        "⏭️ 건너뛴 파일 (mapgen/palette/mod_tileset):".bright_yellow()
    );
    for path in skipped {
        println!("  {} {:?}", "•".yellow(), path);
    }
}

/// 에러 목록 출력
fn print_errors(errors: &[(PathBuf, String)], verbose: bool) {
    if errors.is_empty() {
        return;
    }

    println!("\n{}", "❌ 오류 발생 파일:".bright_red());
    for (path, error) in errors {
        println!("  {} {:?}", "•".red(), path);
        if verbose {
            println!("    {}", error.dimmed());
        }
    }
}

/// 진행률 바 생성
fn create_progress_bar(total: usize, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap()
            .progress_chars("█▓▒░"),
    );
    pb
}
