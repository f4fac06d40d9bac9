//! # Log Publisher
//!
//! 一定間隔でログをアップロードし続けるバックグラウンドタスク
//!
//! ライフサイクル: CREATED (`new`) → RUNNING (`start`) → STOPPING (`stop`) → STOPPED (ループ終了)

use anyhow::{anyhow, Result};
use log::{debug, error, info};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use super::use_cases::publish_logs::PublishLogsUseCase;
use crate::domain::entities::publisher_config::PublisherConfig;
use crate::domain::repositories::log_repository::LogRepository;
use crate::domain::repositories::object_store::ObjectStore;

/// ログパブリッシャー
///
/// 設定、停止トークン、ユースケースを所有する。
/// `start` で自身を消費するため、起動は一度きり
pub struct LogPublisher<L: LogRepository, S: ObjectStore + ?Sized> {
    config: PublisherConfig,
    use_case: PublishLogsUseCase<L, S>,
    stop_token: CancellationToken,
}

impl<L, S> LogPublisher<L, S>
where
    L: LogRepository + 'static,
    S: ObjectStore + ?Sized + 'static,
{
    pub fn new(config: PublisherConfig, use_case: PublishLogsUseCase<L, S>) -> Self {
        Self {
            config,
            use_case,
            stop_token: CancellationToken::new(),
        }
    }

    /// ループを tokio ランタイム上で起動する
    pub fn start(self) -> PublisherHandle {
        let stop_token = self.stop_token.clone();
        let kind = self.config.source.kind();
        let task = tokio::spawn(self.run());

        PublisherHandle {
            kind,
            stop_token,
            task,
        }
    }

    /// Runs the publishing loop until the stop token is cancelled.
    ///
    /// The first pass always runs, and one final pass follows the stop request,
    /// so the file state at stop time is captured. An upload error ends the
    /// loop immediately and is returned.
    pub async fn run(self) -> Result<()> {
        let kind = self.config.source.kind();
        info!("Start copying Spark {} logs to S3.", kind);

        loop {
            self.publish_once().await?;

            if self.wait_next_tick().await {
                break;
            }
        }

        self.publish_once().await?;

        info!("Finished copying Spark {} logs to S3.", kind);
        Ok(())
    }

    async fn publish_once(&self) -> Result<()> {
        let summary = self.use_case.execute(&self.config).await?;
        if summary.uploaded_count() == 0 {
            debug!(
                "No Spark {} log files at {} yet",
                self.config.source.kind(),
                self.config.source.path().display()
            );
        } else {
            info!(
                "Copied {} Spark {} log file(s) to s3://{}",
                summary.uploaded_count(),
                self.config.source.kind(),
                self.config.bucket
            );
        }
        Ok(())
    }

    /// Sleeps for one interval. Returns `true` once stop has been requested.
    async fn wait_next_tick(&self) -> bool {
        let interval = self.config.interval();
        tokio::select! {
            biased;
            _ = self.stop_token.cancelled() => true,
            _ = sleep(interval) => self.stop_token.is_cancelled(),
        }
    }
}

/// 起動済みパブリッシャーへのハンドル
///
/// 状態の問い合わせは提供しない。停止要求と終了待ちのみ
pub struct PublisherHandle {
    kind: &'static str,
    stop_token: CancellationToken,
    task: JoinHandle<Result<()>>,
}

impl PublisherHandle {
    /// 停止を要求する
    ///
    /// ブロックせず、実行中のアップロードもキャンセルしない
    pub fn stop(&self) {
        self.stop_token.cancel();
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// ループの終了を待ち、その結果を返す
    ///
    /// # Errors
    ///
    /// アップロードに失敗した場合、またはタスクがpanicした場合にエラーを返す
    pub async fn join(self) -> Result<()> {
        let kind = self.kind;
        let result = self
            .task
            .await
            .map_err(|e| anyhow!("Spark {} log publisher task failed: {}", kind, e))?;

        if let Err(e) = &result {
            error!("Spark {} log publisher stopped with error: {:#}", kind, e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use log::{Level, LevelFilter};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::thread::ThreadId;

    use crate::domain::entities::log_file::LogFile;
    use crate::domain::entities::publisher_config::LogSource;
    use crate::domain::repositories::object_store::MockObjectStore;

    /// discover の呼び出し回数を数え、指定回数で停止を要求するリポジトリ
    struct CountingLogRepository {
        files: Vec<PathBuf>,
        calls: Arc<AtomicUsize>,
        stop_after: Option<(usize, CancellationToken)>,
    }

    #[async_trait]
    impl LogRepository for CountingLogRepository {
        async fn discover(&self, _source: &LogSource) -> Result<Vec<LogFile>> {
            let calls = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some((limit, token)) = &self.stop_after {
                if calls >= *limit {
                    token.cancel();
                }
            }
            Ok(self
                .files
                .iter()
                .filter_map(|p| LogFile::from_path(p.clone()))
                .collect())
        }
    }

    fn publisher(
        files: &[&str],
        store: MockObjectStore,
        calls: Arc<AtomicUsize>,
    ) -> LogPublisher<CountingLogRepository, MockObjectStore> {
        let repo = CountingLogRepository {
            files: files.iter().map(PathBuf::from).collect(),
            calls,
            stop_after: None,
        };
        LogPublisher::new(
            PublisherConfig::driver("logs-bucket"),
            PublishLogsUseCase::new(Arc::new(repo), Arc::new(store)),
        )
    }

    #[tokio::test]
    async fn test_stop_immediately_after_start_runs_two_passes() {
        let mut store = MockObjectStore::new();
        store
            .expect_upload_file()
            .times(2)
            .returning(|_, _, _| Ok(()));
        let calls = Arc::new(AtomicUsize::new(0));

        let handle = publisher(&["/var/log/spark_driver_logs.txt"], store, calls.clone()).start();
        handle.stop();
        let result = handle.join().await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    /// 現在のスレッドから出力されたログを記録するロガー
    struct CapturingLogger {
        records: Mutex<Vec<(ThreadId, Level, String)>>,
    }

    impl log::Log for CapturingLogger {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            self.records.lock().unwrap().push((
                std::thread::current().id(),
                record.level(),
                record.args().to_string(),
            ));
        }

        fn flush(&self) {}
    }

    static LOGGER: CapturingLogger = CapturingLogger {
        records: Mutex::new(Vec::new()),
    };

    fn init_logger() {
        // 他のテストで設定済みでも構わない
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Trace);

        let thread = std::thread::current().id();
        LOGGER
            .records
            .lock()
            .unwrap()
            .retain(|(id, _, _)| *id != thread);
    }

    fn info_lines_of_current_thread() -> Vec<String> {
        let thread = std::thread::current().id();
        LOGGER
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, level, _)| *id == thread && *level == Level::Info)
            .map(|(_, _, message)| message.clone())
            .collect()
    }

    async fn run_stopped_publisher_without_logs(config: PublisherConfig) -> usize {
        let calls = Arc::new(AtomicUsize::new(0));
        let repo = CountingLogRepository {
            files: vec![],
            calls: calls.clone(),
            stop_after: None,
        };
        let publisher = LogPublisher::new(
            config,
            PublishLogsUseCase::new(Arc::new(repo), Arc::new(MockObjectStore::new())),
        );
        publisher.stop_token.cancel();

        publisher.run().await.unwrap();
        calls.load(Ordering::SeqCst)
    }

    #[tokio::test]
    async fn test_start_and_finish_lines_logged_without_logs() {
        init_logger();

        let passes = run_stopped_publisher_without_logs(PublisherConfig::driver("logs-bucket")).await;
        assert_eq!(passes, 2);
        let passes =
            run_stopped_publisher_without_logs(PublisherConfig::executor("logs-bucket")).await;
        assert_eq!(passes, 2);

        assert_eq!(
            info_lines_of_current_thread(),
            vec![
                "Start copying Spark driver logs to S3.",
                "Finished copying Spark driver logs to S3.",
                "Start copying Spark executor logs to S3.",
                "Finished copying Spark executor logs to S3.",
            ]
        );
    }

    #[tokio::test]
    async fn test_absent_path_never_uploads() {
        let store = MockObjectStore::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let handle = publisher(&[], store, calls.clone()).start();
        handle.stop();

        assert!(handle.join().await.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_at_most_one_pass_after_stop() {
        let mut store = MockObjectStore::new();
        store
            .expect_upload_file()
            .times(4)
            .returning(|_, _, _| Ok(()));
        let calls = Arc::new(AtomicUsize::new(0));
        let stop_token = CancellationToken::new();

        let repo = CountingLogRepository {
            files: vec![PathBuf::from("/var/log/spark_driver_logs.txt")],
            calls: calls.clone(),
            stop_after: Some((3, stop_token.clone())),
        };
        let mut publisher = LogPublisher::new(
            PublisherConfig::driver("logs-bucket").with_interval_secs(20),
            PublishLogsUseCase::new(Arc::new(repo), Arc::new(store)),
        );
        publisher.stop_token = stop_token;

        // 3回目のティックで停止要求 → 最終パス1回で終了
        publisher.run().await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_upload_error_terminates_publisher() {
        let mut store = MockObjectStore::new();
        store
            .expect_upload_file()
            .times(1)
            .returning(|_, _, _| anyhow::bail!("connection reset by peer"));
        let calls = Arc::new(AtomicUsize::new(0));

        let handle = publisher(&["/var/log/spark_driver_logs.txt"], store, calls.clone()).start();
        let result = handle.join().await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_handle_kind() {
        let store = MockObjectStore::new();
        let handle = publisher(&[], store, Arc::new(AtomicUsize::new(0))).start();
        assert_eq!(handle.kind(), "driver");
        handle.stop();
        handle.join().await.unwrap();
    }
}
