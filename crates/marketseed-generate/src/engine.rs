use std::time::Instant;

use indicatif::ProgressBar;
use tracing::{info, warn};

use marketseed_core::{
    Advert, Category, IdPool, Job, JobKey, Notification, Offer, Row, RowSink, TableSpec, User,
};

use crate::batch::{BatchSummary, BatchWriter, FlushPolicy};
use crate::errors::GenerationError;
use crate::generators::adverts::build_advert;
use crate::generators::categories::build_category;
use crate::generators::jobs::{build_job, build_job_keys};
use crate::generators::notifications::build_notification;
use crate::generators::offers::build_offer;
use crate::generators::users::UserFactory;
use crate::generators::{now, table_rng};
use crate::model::{SeedOptions, SeedReport, TableReport};
use crate::progress::table_progress;

/// Upper bound on pool pre-allocation, so huge counts grow on demand instead.
const POOL_CAPACITY_HINT: u64 = 1 << 20;

/// Entry point for seeding the marketplace tables.
///
/// Tables are generated strictly in foreign-key order; each step returns the
/// ID pool consumed by the steps after it.
#[derive(Debug, Clone)]
pub struct SeedEngine {
    options: SeedOptions,
}

impl SeedEngine {
    pub fn new(options: SeedOptions) -> Result<Self, GenerationError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &SeedOptions {
        &self.options
    }

    pub async fn run(
        &self,
        run_id: &str,
        sink: &mut dyn RowSink,
    ) -> Result<SeedReport, GenerationError> {
        let start = Instant::now();
        let seed = self.options.seed.unwrap_or_else(rand::random);
        let mut report = SeedReport::new(run_id.to_string(), seed, sink.engine());

        info!(
            run_id = %run_id,
            seed,
            engine = sink.engine(),
            flush_threshold = self.options.flush_threshold,
            "seeding started"
        );

        let outcome = self.seed_all(sink, seed, &mut report).await;
        report.duration_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(()) => {
                info!(
                    run_id = %run_id,
                    tables = report.tables.len(),
                    rows_total = report.rows_total,
                    duration_ms = report.duration_ms,
                    "seeding completed"
                );
                Ok(report)
            }
            Err(err) => {
                warn!(
                    run_id = %run_id,
                    error = %err,
                    tables_completed = report.tables.len(),
                    "seeding failed"
                );
                Err(err)
            }
        }
    }

    async fn seed_all(
        &self,
        sink: &mut dyn RowSink,
        seed: u64,
        report: &mut SeedReport,
    ) -> Result<(), GenerationError> {
        let users = self.insert_users(sink, seed, report).await?;
        let categories = self.insert_categories(sink, seed, report).await?;
        let jobs = self.insert_jobs(sink, seed, &categories, report).await?;
        self.insert_job_keys(sink, seed, &jobs, report).await?;
        let adverts = self.insert_adverts(sink, seed, &users, &jobs, report).await?;
        let offers = self.insert_offers(sink, seed, &users, &adverts, report).await?;
        self.insert_notifications(sink, seed, &offers, &users, report).await?;
        Ok(())
    }

    fn threshold_policy(&self) -> FlushPolicy {
        FlushPolicy::EveryRows(self.options.flush_threshold)
    }

    async fn insert_users(
        &self,
        sink: &mut dyn RowSink,
        seed: u64,
        report: &mut SeedReport,
    ) -> Result<IdPool<User>, GenerationError> {
        let count = self.options.counts.users;
        let step = TableStep::start(User::TABLE, count, self.options.show_progress);
        let mut rng = table_rng(seed, User::TABLE.name);
        let mut factory = UserFactory::new()?;
        let mut pool = IdPool::with_capacity(capacity_hint(count));

        let mut writer = BatchWriter::new(sink, FlushPolicy::OnFinish);
        for _ in 0..count {
            let user = factory.build(&mut rng, now())?;
            pool.push(user.id);
            writer.push(user).await?;
            step.progress.inc(1);
        }
        report.record_table(step.finish(Some(count), writer.finish().await?));

        Ok(pool)
    }

    async fn insert_categories(
        &self,
        sink: &mut dyn RowSink,
        seed: u64,
        report: &mut SeedReport,
    ) -> Result<IdPool<Category>, GenerationError> {
        let count = self.options.counts.categories;
        let step = TableStep::start(Category::TABLE, count, self.options.show_progress);
        let mut rng = table_rng(seed, Category::TABLE.name);
        let mut pool = IdPool::with_capacity(capacity_hint(count));

        let mut writer = BatchWriter::new(sink, FlushPolicy::OnFinish);
        for _ in 0..count {
            let category = build_category(&mut rng, now());
            pool.push(category.id);
            writer.push(category).await?;
            step.progress.inc(1);
        }
        report.record_table(step.finish(Some(count), writer.finish().await?));

        Ok(pool)
    }

    async fn insert_jobs(
        &self,
        sink: &mut dyn RowSink,
        seed: u64,
        categories: &IdPool<Category>,
        report: &mut SeedReport,
    ) -> Result<IdPool<Job>, GenerationError> {
        let count = self.options.counts.jobs;
        let step = TableStep::start(Job::TABLE, count, self.options.show_progress);
        let mut rng = table_rng(seed, Job::TABLE.name);
        let mut pool = IdPool::with_capacity(capacity_hint(count));

        let mut writer = BatchWriter::new(sink, self.threshold_policy());
        for _ in 0..count {
            let job = build_job(&mut rng, now(), categories)?;
            pool.push(job.id);
            writer.push(job).await?;
            step.progress.inc(1);
        }
        report.record_table(step.finish(Some(count), writer.finish().await?));

        Ok(pool)
    }

    async fn insert_job_keys(
        &self,
        sink: &mut dyn RowSink,
        seed: u64,
        jobs: &IdPool<Job>,
        report: &mut SeedReport,
    ) -> Result<(), GenerationError> {
        let max_keys = self.options.counts.keys_per_job;
        let step = TableStep::start(JobKey::TABLE, jobs.len() as u64, self.options.show_progress);
        let mut rng = table_rng(seed, JobKey::TABLE.name);

        let mut writer = BatchWriter::new(sink, self.threshold_policy());
        for job_id in jobs {
            writer
                .extend(build_job_keys(&mut rng, *job_id, max_keys))
                .await?;
            step.progress.inc(1);
        }
        report.record_table(step.finish(None, writer.finish().await?));

        Ok(())
    }

    async fn insert_adverts(
        &self,
        sink: &mut dyn RowSink,
        seed: u64,
        users: &IdPool<User>,
        jobs: &IdPool<Job>,
        report: &mut SeedReport,
    ) -> Result<IdPool<Advert>, GenerationError> {
        let count = self.options.counts.adverts;
        let step = TableStep::start(Advert::TABLE, count, self.options.show_progress);
        let mut rng = table_rng(seed, Advert::TABLE.name);
        let mut pool = IdPool::with_capacity(capacity_hint(count));

        let mut writer = BatchWriter::new(sink, self.threshold_policy());
        for _ in 0..count {
            let advert = build_advert(&mut rng, now(), users, jobs)?;
            pool.push(advert.id);
            writer.push(advert).await?;
            step.progress.inc(1);
        }
        report.record_table(step.finish(Some(count), writer.finish().await?));

        Ok(pool)
    }

    async fn insert_offers(
        &self,
        sink: &mut dyn RowSink,
        seed: u64,
        users: &IdPool<User>,
        adverts: &IdPool<Advert>,
        report: &mut SeedReport,
    ) -> Result<IdPool<Offer>, GenerationError> {
        let count = self.options.counts.offers;
        let step = TableStep::start(Offer::TABLE, count, self.options.show_progress);
        let mut rng = table_rng(seed, Offer::TABLE.name);
        let mut pool = IdPool::with_capacity(capacity_hint(count));

        let mut writer = BatchWriter::new(sink, self.threshold_policy());
        for _ in 0..count {
            let offer = build_offer(&mut rng, now(), users, adverts)?;
            pool.push(offer.id);
            writer.push(offer).await?;
            step.progress.inc(1);
        }
        report.record_table(step.finish(Some(count), writer.finish().await?));

        Ok(pool)
    }

    async fn insert_notifications(
        &self,
        sink: &mut dyn RowSink,
        seed: u64,
        offers: &IdPool<Offer>,
        users: &IdPool<User>,
        report: &mut SeedReport,
    ) -> Result<(), GenerationError> {
        let count = self.options.counts.notifications;
        let step = TableStep::start(Notification::TABLE, count, self.options.show_progress);
        let mut rng = table_rng(seed, Notification::TABLE.name);

        let mut writer = BatchWriter::new(sink, self.threshold_policy());
        for _ in 0..count {
            writer
                .push(build_notification(&mut rng, now(), offers, users)?)
                .await?;
            step.progress.inc(1);
        }
        report.record_table(step.finish(Some(count), writer.finish().await?));

        Ok(())
    }
}

/// Timing, logging and progress for one table.
struct TableStep {
    table: &'static str,
    started: Instant,
    progress: ProgressBar,
}

impl TableStep {
    fn start(table: &'static TableSpec, units: u64, show_progress: bool) -> Self {
        info!(table = table.name, units, "generating table");
        Self {
            table: table.name,
            started: Instant::now(),
            progress: table_progress(table.name, units, show_progress),
        }
    }

    fn finish(self, rows_requested: Option<u64>, summary: BatchSummary) -> TableReport {
        self.progress.finish();
        let duration_ms = self.started.elapsed().as_millis() as u64;
        info!(
            table = self.table,
            rows_written = summary.rows_written,
            commits = summary.commits,
            duration_ms,
            "table seeded"
        );
        TableReport {
            table: self.table.to_string(),
            rows_requested,
            rows_written: summary.rows_written,
            commits: summary.commits,
            duration_ms,
        }
    }
}

fn capacity_hint(count: u64) -> usize {
    count.min(POOL_CAPACITY_HINT) as usize
}
