//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// jmigrate CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "jmigrate",
    author = "YourName <your@email.com>",
    version,
    about = "GAME DATA JSON MIGRATOR - 게임 데이터 JSON을 스키마 기반으로 일괄 변환/조회하는 고성능 CLI 도구",
    long_about = r#"
GAME DATA JSON MIGRATOR
=======================

지정된 경로의 모든 게임 데이터 JSON 파일을 재귀적으로 탐색하여
스키마에 매칭되는 레코드를 변환(제자리 재작성)하거나 조회합니다.

특징:
  • 병렬 파일 읽기/쓰기, 파일 단위 실패 격리
  • 레거시 단위 인코딩 → 단위 문자열 마이그레이션 내장
  • 매칭되지 않은 레코드와 미지의 필드는 그대로 보존
  • mapgen/palette/mod_tileset 파일은 건너뛰고 보고
  • 타입/id 기반 조회와 필드 추출

예제:
  jmigrate migrate -p ./data/json
  jmigrate migrate -p ./data/json --format ./tools/json_formatter
  jmigrate query -p ./data/json --type mutation --field flags
  jmigrate query -p ./data/json --type GUN --id m4 -o result.json
"#
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

/// 실행 모드
#[derive(Subcommand, Debug)]
pub enum Command {
    /// 레거시 단위 필드를 제자리에서 마이그레이션
    Migrate {
        /// JSON을 재귀적으로 찾을 경로 (파일 또는 디렉토리, 반복 가능)
        #[arg(short, long = "path", required = true)]
        paths: Vec<PathBuf>,

        /// 변환 후 각 파일에 실행할 외부 JSON 포매터 경로
        #[arg(long)]
        format: Option<PathBuf>,

        /// 모든 출력 억제
        #[arg(short, long)]
        quiet: bool,

        /// 실제 쓰기 없이 처리될 파일 목록만 표시
        #[arg(long)]
        dry_run: bool,

        /// 병렬 처리 스레드 수 (기본값: CPU 코어 수)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// 상세 출력 모드
        #[arg(short, long)]
        verbose: bool,
    },

    /// 스키마에 매칭되는 엔트리 조회
    Query {
        /// JSON을 재귀적으로 찾을 경로 (파일 또는 디렉토리, 반복 가능)
        #[arg(short, long = "path", required = true)]
        paths: Vec<PathBuf>,

        /// 조회할 엔트리 type
        #[arg(short = 't', long = "type")]
        entry_type: String,

        /// 조회할 엔트리 id (생략 시 type만 비교)
        #[arg(long)]
        id: Option<String>,

        /// 매칭된 레코드에서 추출할 필드
        #[arg(long)]
        field: Option<String>,

        /// 출력 파일 경로 (생략 시 stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 모든 출력 억제
        #[arg(short, long)]
        quiet: bool,
    },
}
