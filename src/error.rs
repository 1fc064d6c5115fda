//! 에러 타입 정의 모듈
//!
//! jmigrate에서 발생할 수 있는 모든 에러 타입을 정의합니다.

use std::path::PathBuf;
use thiserror::Error;

/// jmigrate에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum JMigrateError {
    /// 경로가 JSON 파일도 디렉토리도 아님
    #[error("유효한 JSON 파일 또는 디렉토리가 아닙니다: {path}")]
    InvalidPath { path: PathBuf },

    /// 제외 목록에 포함된 파일 이름
    #[error("데이터 파일이 아닌 예약된 파일입니다: {path}")]
    ExcludedFile { path: PathBuf },

    /// 파일 읽기 실패
    #[error("파일을 읽을 수 없습니다 ({file}): {reason}")]
    FileReadError { file: PathBuf, reason: String },

    /// JSON 파싱 실패
    #[error("JSON 파싱 실패 ({file}): {reason}")]
    ParseError { file: PathBuf, reason: String },

    /// JSON 직렬화 실패
    #[error("JSON 직렬화 실패: {reason}")]
    SerializeError { reason: String },

    /// 단위 문자열 형식 오류
    #[error("인식할 수 없는 단위 형식입니다: {value:?}")]
    InvalidUnitFormat { value: String },

    /// 파일 쓰기 실패
    #[error("파일 쓰기 실패 ({file}): {reason}")]
    WriteError { file: PathBuf, reason: String },

    /// 스레드 풀 초기화 실패
    #[error("스레드 풀 초기화 실패: {reason}")]
    ThreadPoolError { reason: String },

    /// 처리할 파일 없음
    #[error("처리할 JSON 파일이 없습니다")]
    NoFilesFound,
}

impl JMigrateError {
    /// `std::path::Path` 표시용 헬퍼: 경로와 이유로 읽기 에러 생성
    pub fn read(file: impl Into<PathBuf>, e: impl std::fmt::Display) -> Self {
        JMigrateError::FileReadError {
            file: file.into(),
            reason: e.to_string(),
        }
    }

    /// 경로와 이유로 파싱 에러 생성
    pub fn parse(file: impl Into<PathBuf>, e: impl std::fmt::Display) -> Self {
        JMigrateError::ParseError {
            file: file.into(),
            reason: e.to_string(),
        }
    }
}

/// jmigrate 결과 타입 별칭
pub type Result<T> = std::result::Result<T, JMigrateError>;
