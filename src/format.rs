//! 외부 포매터 연동 모듈
//!
//! 변환 배치가 끝난 뒤 변경된 파일마다 외부 JSON 포매터 실행 파일을
//! 한 번씩 호출합니다. 포매터의 부재나 실패는 변환 실패가 아니며
//! 로그만 남깁니다.

use colored::Colorize;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// 포매터 실행 옵션
#[derive(Debug, Clone)]
pub struct FmtOptions {
    /// 포매터 실행 파일 경로
    pub formatter_path: PathBuf,
    /// 출력 억제 여부
    pub quiet: bool,
}

/// 파일 하나에 포매터 실행, 진단 정보 출력
fn fmt_one(options: &FmtOptions, path: &Path) {
    let output = Command::new(&options.formatter_path).arg(path).output();

    match output {
        Ok(out) => {
            if !options.quiet {
                println!(
                    "  {} {} (code: {:?})\n    stdout: {}\n    stderr: {}",
                    "fmt".bright_cyan(),
                    path.display(),
                    out.status.code(),
                    String::from_utf8_lossy(&out.stdout).trim(),
                    String::from_utf8_lossy(&out.stderr).trim(),
                );
            }
        }
        Err(e) => {
            println!(
                "{} 포매터 실행 실패 @ {}: {}",
                "WARN".on_yellow().black(),
                path.display(),
                e
            );
        }
    }
}

/// 주어진 모든 경로에 포매터를 병렬로 실행
pub fn format_recursively(options: &FmtOptions, paths: &[PathBuf]) {
    paths.par_iter().for_each(|path| fmt_one(options, path));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_formatter_does_not_panic() {
        let options = FmtOptions {
            formatter_path: PathBuf::from("/nonexistent/json_formatter"),
            quiet: true,
        };

        // 포매터가 없어도 배치는 정상 종료해야 함
        format_recursively(&options, &[PathBuf::from("a.json"), PathBuf::from("b.json")]);
    }
}
