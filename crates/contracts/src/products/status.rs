//! Чистая сводка по статусам jobs одной загрузки.
//!
//! Карта статусов принадлежит frontend-контексту; здесь только функции
//! без состояния, пересчитываемые при каждом обращении.

use std::collections::HashMap;

use super::dto::{CsvError, JobStatus, UploadStatusDto};

impl JobStatus {
    /// Терминальный статус — переходов по job больше не будет
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// Сводка по всем отслеживаемым jobs за один раунд опроса
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusAggregate {
    pub total_processed: u64,
    pub total_errors: usize,
    pub all_terminal: bool,
}

impl StatusAggregate {
    /// Считает сводку по порядку `job_ids`. Job без записи в карте ещё не
    /// опрошен ни разу и не даёт `all_terminal`.
    pub fn compute(job_ids: &[String], statuses: &HashMap<String, UploadStatusDto>) -> Self {
        let mut agg = StatusAggregate {
            all_terminal: true,
            ..Default::default()
        };
        for id in job_ids {
            match statuses.get(id) {
                Some(status) => {
                    agg.total_processed += status.processed.unwrap_or(0);
                    agg.total_errors += status.errors.len();
                    agg.all_terminal &= status.status.is_terminal();
                }
                None => agg.all_terminal = false,
            }
        }
        agg
    }
}

/// Плоский список построчных ошибок всех jobs: порядок jobs как в
/// `job_ids`, внутри job — по возрастанию номера строки.
pub fn collect_line_errors(
    job_ids: &[String],
    statuses: &HashMap<String, UploadStatusDto>,
) -> Vec<CsvError> {
    let mut all = Vec::new();
    for id in job_ids {
        let Some(status) = statuses.get(id) else {
            continue;
        };
        let mut errors = status.errors.clone();
        errors.sort_by_key(|e| e.line);
        all.extend(errors);
    }
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: JobStatus, processed: Option<u64>, errors: Vec<(u32, &str)>) -> UploadStatusDto {
        UploadStatusDto {
            status,
            processed,
            errors: errors
                .into_iter()
                .map(|(line, error)| CsvError {
                    line,
                    error: error.to_string(),
                })
                .collect(),
        }
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn aggregate_sums_processed_and_errors() {
        let job_ids = ids(&["j1", "j2"]);
        let mut map = HashMap::new();
        map.insert("j1".to_string(), status(JobStatus::Processing, Some(100), vec![(5, "x")]));
        map.insert("j2".to_string(), status(JobStatus::Completed, Some(40), vec![(1, "y"), (2, "z")]));

        let agg = StatusAggregate::compute(&job_ids, &map);
        assert_eq!(agg.total_processed, 140);
        assert_eq!(agg.total_errors, 3);
        assert!(!agg.all_terminal);
    }

    #[test]
    fn failed_job_is_terminal() {
        let job_ids = ids(&["j1", "j2"]);
        let mut map = HashMap::new();
        map.insert("j1".to_string(), status(JobStatus::Completed, Some(10), vec![]));
        map.insert("j2".to_string(), status(JobStatus::Failed, None, vec![(7, "boom")]));

        let agg = StatusAggregate::compute(&job_ids, &map);
        assert!(agg.all_terminal);
        assert_eq!(agg.total_errors, 1);
    }

    #[test]
    fn unpolled_job_blocks_terminal() {
        let job_ids = ids(&["j1", "j2"]);
        let mut map = HashMap::new();
        map.insert("j1".to_string(), status(JobStatus::Completed, Some(10), vec![]));

        let agg = StatusAggregate::compute(&job_ids, &map);
        assert!(!agg.all_terminal);
        assert_eq!(agg.total_processed, 10);
    }

    #[test]
    fn errors_follow_job_order_then_line_order() {
        let job_ids = ids(&["j2", "j1"]);
        let mut map = HashMap::new();
        map.insert("j1".to_string(), status(JobStatus::Completed, None, vec![(1, "a")]));
        map.insert("j2".to_string(), status(JobStatus::Completed, None, vec![(9, "c"), (4, "b")]));

        let collected = collect_line_errors(&job_ids, &map);
        let as_pairs: Vec<(u32, &str)> = collected.iter().map(|e| (e.line, e.error.as_str())).collect();
        assert_eq!(as_pairs, vec![(4, "b"), (9, "c"), (1, "a")]);
    }

    // Сценарий из двух раундов: j1 processing / j2 completed, затем j1
    // completed с одной ошибкой строки 3.
    #[test]
    fn two_round_scenario_converges_with_single_error() {
        let job_ids = ids(&["j1", "j2"]);
        let mut map = HashMap::new();
        map.insert("j1".to_string(), status(JobStatus::Processing, Some(2), vec![]));
        map.insert("j2".to_string(), status(JobStatus::Completed, Some(5), vec![]));
        assert!(!StatusAggregate::compute(&job_ids, &map).all_terminal);

        map.insert(
            "j1".to_string(),
            status(JobStatus::Completed, Some(3), vec![(3, "bad price")]),
        );
        let agg = StatusAggregate::compute(&job_ids, &map);
        assert!(agg.all_terminal);
        assert_eq!(agg.total_errors, 1);

        let errors = collect_line_errors(&job_ids, &map);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 3);
        assert_eq!(errors[0].error, "bad price");
    }
}
