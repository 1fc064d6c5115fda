//! 통계 및 타이밍 모듈
//!
//! 배치 처리 통계 수집과 소요 시간 표시를 담당합니다.

use colored::{ColoredString, Colorize};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// 처리 통계 구조체
#[derive(Debug, Default)]
pub struct Statistics {
    /// 총 파일 수
    pub total_files: usize,
    /// 재작성된 파일 수
    pub rewritten_count: AtomicUsize,
    /// 건너뛴 파일 수
    pub skipped_count: AtomicUsize,
    /// 에러 발생 수
    pub error_count: AtomicUsize,
    /// 쓴 총 바이트
    pub total_bytes_written: AtomicU64,
    /// 처리 시작 시간
    start_time: Option<Instant>,
}

impl Statistics {
    /// 새 통계 인스턴스 생성
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files,
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// 재작성 카운트 추가
    pub fn add_rewritten(&self, n: usize) {
        self.rewritten_count.fetch_add(n, Ordering::Relaxed);
    }

    /// 건너뜀 카운트 추가
    pub fn add_skipped(&self, n: usize) {
        self.skipped_count.fetch_add(n, Ordering::Relaxed);
    }

    /// 에러 카운트 추가
    pub fn add_errors(&self, n: usize) {
        self.error_count.fetch_add(n, Ordering::Relaxed);
    }

    /// 쓴 바이트 추가
    pub fn add_bytes_written(&self, bytes: u64) {
        self.total_bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    /// 재작성 수 반환
    pub fn get_rewritten(&self) -> usize {
        self.rewritten_count.load(Ordering::Relaxed)
    }

    /// 건너뜀 수 반환
    pub fn get_skipped(&self) -> usize {
        self.skipped_count.load(Ordering::Relaxed)
    }

    /// 에러 수 반환
    pub fn get_errors(&self) -> usize {
        self.error_count.load(Ordering::Relaxed)
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// 마이그레이션 통계 요약 출력
    pub fn print_migration_summary(&self) {
        let rewritten = self.get_rewritten();
        let skipped = self.get_skipped();
        let errors = self.get_errors();
        let bytes_written = self.total_bytes_written.load(Ordering::Relaxed);

        println!("\n{}", "═".repeat(50).bright_blue());
        println!("{}", " 📊 마이그레이션 통계".bright_white().bold());
        println!("{}", "═".repeat(50).bright_blue());

        println!(
            "  {} 전체 파일:    {}",
            "📁".bright_cyan(),
            self.total_files
        );
        println!(
            "  {} 재작성:       {}",
            "✅".bright_green(),
            rewritten.to_string().green()
        );
        println!(
            "  {} 건너뜀:       {}",
            "⏭️".bright_yellow(),
            skipped.to_string().yellow()
        );

        if errors > 0 {
            println!(
                "  {} 실패:         {}",
                "❌".bright_red(),
                errors.to_string().red()
            );
        } else {
            println!("  {} 실패:         {}", "✅".bright_green(), "0".green());
        }

        println!(
            "  {} 출력 용량:    {}",
            "📤".bright_magenta(),
            format_bytes(bytes_written)
        );
        println!(
            "  {} 처리 시간:    {:.2}초",
            "⏱️".bright_cyan(),
            self.elapsed().as_secs_f64()
        );

        println!("{}", "═".repeat(50).bright_blue());
    }
}

/// 바이트를 읽기 쉬운 형식으로 변환
///
/// # Examples
/// ```
/// use jmigrate::stats::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1048576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// 소요 시간 표시에 쓸 색상 선택 (짧을수록 초록, 길수록 빨강)
fn color_ms(ms: u128, text: String) -> ColoredString {
    if ms < 100 {
        text.bright_green()
    } else if ms < 500 {
        text.bright_yellow()
    } else if ms < 1000 {
        text.bright_red()
    } else {
        text.bright_white().bold().on_bright_red()
    }
}

/// 작업 소요 시간 측정 및 출력 헬퍼
///
/// quiet 플래그를 앰비언트 상태 대신 명시적으로 전달받아 보관합니다.
#[derive(Debug, Clone, Copy)]
pub struct Timeit {
    quiet: bool,
}

impl Timeit {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// 클로저를 실행하고 이름과 소요 시간을 출력
    pub fn run<T>(&self, name: &str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = f();
        let ms = start.elapsed().as_millis();

        if !self.quiet {
            println!("{} {}", name, color_ms(ms, format!("({}ms)", ms)));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1048576), "1.00 MB");
        assert_eq!(format_bytes(1073741824), "1.00 GB");
    }

    #[test]
    fn test_statistics_counters() {
        let stats = Statistics::new(10);

        stats.add_rewritten(2);
        stats.add_skipped(1);
        stats.add_errors(1);
        stats.add_bytes_written(512);

        assert_eq!(stats.get_rewritten(), 2);
        assert_eq!(stats.get_skipped(), 1);
        assert_eq!(stats.get_errors(), 1);
        assert_eq!(stats.total_bytes_written.load(Ordering::Relaxed), 512);
    }

    #[test]
    fn test_timeit_returns_result() {
        let timeit = Timeit::new(true);
        let value = timeit.run("task", || 40 + 2);
        assert_eq!(value, 42);
    }
}
