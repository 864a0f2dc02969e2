//! The orchestrator that sequences LevelAssigner, Catalog, the two loaders,
//! and the Netter into one `Run`: an explicit level-by-level loop, a
//! single-run guard, and the full event/audit/summary surface.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use bom_core::{BomRepository, Part, Result as BomResult};
use bom_graph::{BomGraph, LevelAssigner};
use chrono::{NaiveDate, Utc};
use mrp_adapters::{StorageReader, StorageWriter};
use mrp_core::{
    CalendarDays, ComponentSummary, DateOffset, EngineConfig, EventSink, LevelRecord, MrpError,
    NoopEventSink, ParametersAudit, PlannedOrder, Requirement, Result, Run, RunSummary, Supply,
};
use rayon::prelude::*;
use rust_decimal::Decimal;

use crate::catalog::{Catalog, CatalogEntry};
use crate::requirements_loader::RequirementsLoader;
use crate::supplies_loader::SuppliesLoader;
use crate::netter::Netter;

/// Adapts the richer `StorageReader` to the narrow `BomRepository` seam
/// `bom-graph` depends on, so `mrp-calc` is the only crate that knows both
/// surfaces exist.
struct ReaderAsBomRepository<'a>(&'a dyn StorageReader);

impl BomRepository for ReaderAsBomRepository<'_> {
    fn get_all_bom_edges(&self) -> BomResult<Vec<bom_core::BomEdge>> {
        self.0
            .get_bom_edges()
            .map_err(|e| bom_core::BomError::RepositoryError(e.to_string()))
    }
}

/// Ties the five pipeline stages together into a single run. One `Engine`
/// instance owns the single-run guard; a second concurrent call to `run`
/// fails fast with `AlreadyRunning` rather than corrupting a shared working
/// set.
pub struct Engine<'a> {
    reader: &'a dyn StorageReader,
    writer: &'a dyn StorageWriter,
    event_sink: &'a dyn EventSink,
    running: AtomicBool,
}

impl<'a> Engine<'a> {
    pub fn new(reader: &'a dyn StorageReader, writer: &'a dyn StorageWriter) -> Self {
        Self::with_event_sink(reader, writer, &NoopEventSink)
    }

    pub fn with_event_sink(
        reader: &'a dyn StorageReader,
        writer: &'a dyn StorageWriter,
        event_sink: &'a dyn EventSink,
    ) -> Self {
        Self {
            reader,
            writer,
            event_sink,
            running: AtomicBool::new(false),
        }
    }

    /// Run the full pipeline against `today`, using `run` for cancellation
    /// and deadline tracking. Fails fast with `AlreadyRunning` if another
    /// run is already in progress on this engine.
    pub fn run(&self, config: &EngineConfig, today: NaiveDate, run: &Run) -> Result<RunSummary> {
        self.event_sink.started(config);

        let outcome = (|| {
            config.validate()?;
            if self.running.swap(true, Ordering::SeqCst) {
                return Err(MrpError::AlreadyRunning);
            }
            let _guard = RunningGuard(&self.running);
            self.run_inner(config, today, run)
        })();

        match outcome {
            Ok(summary) => {
                self.event_sink.succeeded(&summary);
                Ok(summary)
            }
            Err(err) => {
                // Fail-fast: nothing from an aborted run stays visible.
                let _ = self.writer.clear_requirements();
                let _ = self.writer.clear_supplies();
                let _ = self.writer.clear_planned_orders();
                let _ = self.writer.clear_levels();
                self.event_sink.failed(&err, config);
                Err(err)
            }
        }
    }

    fn run_inner(&self, config: &EngineConfig, today: NaiveDate, run: &Run) -> Result<RunSummary> {
        let start = std::time::Instant::now();
        tracing::info!(today = %today, "mrp run: clearing working sets");

        self.writer.clear_requirements()?;
        self.writer.clear_supplies()?;
        self.writer.clear_planned_orders()?;
        self.writer.clear_levels()?;

        // Stage 1: LevelAssigner.
        tracing::debug!("stage 1: building BOM graph and assigning low-level codes");
        let bom_repo = ReaderAsBomRepository(self.reader);
        let graph = BomGraph::from_repository(&bom_repo)?;
        let levels = LevelAssigner::assign(&graph)?;
        tracing::debug!(parts = levels.len(), max_llc = levels.max_level(), "levels assigned");

        // Stage 2: Catalog.
        tracing::debug!("stage 2: resolving catalog");
        let item_master = self.reader.get_item_master()?;
        let preferred = self.reader.get_preferred_supplier_lead_times()?;
        let catalog = Catalog::build(&item_master, &preferred);

        // Stage 3 + 4: Requirements and Supplies loaders.
        tracing::debug!("stage 3: loading requirements");
        let requirements = RequirementsLoader::load(self.reader, config, today)?;
        tracing::debug!("stage 4: loading supplies");
        let supplies = SuppliesLoader::load(self.reader, config)?;
        tracing::debug!(
            requirement_rows = requirements.len(),
            supply_rows = supplies.len(),
            "loaders finished"
        );

        let mut requirements_by_part: HashMap<Part, Vec<Requirement>> = HashMap::new();
        for req in requirements {
            requirements_by_part.entry(req.part.clone()).or_default().push(req);
        }
        let mut supplies_by_part: HashMap<Part, Vec<Supply>> = HashMap::new();
        for sup in supplies {
            supplies_by_part.entry(sup.part.clone()).or_default().push(sup);
        }

        // Every part that can ever be netted: BOM-reachable parts (they
        // may receive dependent demand even if they start with none) plus
        // any part carrying direct demand or supply of its own.
        let mut all_parts: Vec<Part> = Vec::new();
        for (part, _) in levels.iter() {
            all_parts.push(part.clone());
        }
        for part in requirements_by_part.keys() {
            if !all_parts.contains(part) {
                all_parts.push(part.clone());
            }
        }
        for part in supplies_by_part.keys() {
            if !all_parts.contains(part) {
                all_parts.push(part.clone());
            }
        }

        let mut parts_by_level: HashMap<u32, Vec<Part>> = HashMap::new();
        for part in all_parts {
            let llc = levels.get(&part);
            parts_by_level.entry(llc).or_default().push(part);
        }

        let date_offset: &dyn DateOffset = &CalendarDays;
        let mut planned_orders: Vec<PlannedOrder> = Vec::new();
        let mut summaries: HashMap<Part, ComponentSummary> = HashMap::new();

        // Process strictly ascending by low-level code. A part's parents
        // always carry a strictly smaller LLC than the part itself (that is
        // the definition LevelAssigner assigns), so by the time a level is
        // reached every explosion that could inject a requirement into it
        // has already run: all requirements that will ever exist for a
        // part are already present once its level comes up.
        let max_level = parts_by_level.keys().copied().max().unwrap_or(0);

        tracing::debug!("stage 5: netting, ascending by low-level code 0..={}", max_level);
        for llc in 0..=max_level {
            run.check()?;

            let mut parts = parts_by_level.remove(&llc).unwrap_or_default();
            parts.sort();
            tracing::debug!(llc, part_count = parts.len(), "netting level");

            let children_by_part: HashMap<Part, Vec<(Part, Decimal)>> = parts
                .iter()
                .map(|part| {
                    let children = active_children(&graph, part, today);
                    (part.clone(), children)
                })
                .collect();

            // Within a level, parts are independent: each task reads only
            // its own part's requirements/supplies plus the shared
            // read-only Catalog/BomGraph.
            let results: Vec<(Part, crate::netter::PartNetResult)> = parts
                .par_iter()
                .map(|part| {
                    run.check()?;
                    let reqs = requirements_by_part.get(part).cloned().unwrap_or_default();
                    let sups = supplies_by_part.get(part).cloned().unwrap_or_default();
                    let entry = catalog.get(part);
                    let children = children_by_part.get(part).cloned().unwrap_or_default();
                    tracing::debug!(part = %part, requirements = reqs.len(), supplies = sups.len(), "netting part");
                    let result = Netter::net_part(part, reqs, sups, entry, config, date_offset, &children);
                    tracing::debug!(part = %part, planned_orders = result.planned_orders.len(), "part netted");
                    Ok::<_, MrpError>((part.clone(), result))
                })
                .collect::<Result<Vec<_>>>()?;

            // Single-writer merge: explosion writes land strictly one level
            // lower, so folding these sequentially (in the same
            // deterministic part-ID order `results` was produced in) keeps
            // the run byte-identical across repeats regardless of how the
            // parallel map above actually interleaved.
            for (part, result) in results {
                requirements_by_part.insert(part.clone(), result.requirements);
                supplies_by_part.insert(part.clone(), result.supplies);

                for dep in result.dependent_requirements {
                    requirements_by_part.entry(dep.part.clone()).or_default().push(dep);
                }

                if !result.planned_orders.is_empty() || result.gross_requirements > Decimal::ZERO
                    || result.scheduled_receipts > Decimal::ZERO
                {
                    let mut summary = ComponentSummary::new(
                        part.clone(),
                        result.gross_requirements,
                        result.scheduled_receipts,
                        result.net_requirements,
                    );
                    if let Some(first) = result.planned_orders.iter().min_by_key(|o| o.due_date) {
                        summary.first_planned_quantity = Some(first.quantity);
                        summary.first_planned_date = Some(first.due_date);
                    }
                    summaries.insert(part, summary);
                }

                planned_orders.extend(result.planned_orders);
            }
        }

        // A part with direct demand but no BOM edge at all (pure purchased
        // item) never appears in `levels` — it defaults to LLC 0 but still
        // needs a Levels row of its own.
        let mut levels_out: Vec<LevelRecord> = Vec::new();
        let mut recorded_parts: std::collections::HashSet<Part> = std::collections::HashSet::new();
        for (part, &llc) in levels.iter() {
            let entry = catalog.get(part);
            levels_out.push(level_record(part.clone(), llc, entry));
            recorded_parts.insert(part.clone());
        }
        for part in requirements_by_part.keys().chain(supplies_by_part.keys()) {
            if recorded_parts.insert(part.clone()) {
                let entry = catalog.get(part);
                levels_out.push(level_record(part.clone(), 0, entry));
            }
        }
        levels_out.sort_by(|a, b| a.part.cmp(&b.part));

        let mut requirements_out: Vec<Requirement> = requirements_by_part.into_values().flatten().collect();
        requirements_out.sort_by(|a, b| (a.part.clone(), a.date_required).cmp(&(b.part.clone(), b.date_required)));
        let mut supplies_out: Vec<Supply> = supplies_by_part.into_values().flatten().collect();
        supplies_out.sort_by(|a, b| (a.part.clone(), a.due_date).cmp(&(b.part.clone(), b.due_date)));
        planned_orders.sort_by(|a, b| (a.part.clone(), a.due_date).cmp(&(b.part.clone(), b.due_date)));

        self.writer.write_requirements(&requirements_out)?;
        self.writer.write_supplies(&supplies_out)?;
        self.writer.write_planned_orders(&planned_orders)?;
        self.writer.write_levels(&levels_out)?;

        let audit = ParametersAudit::from_config(config, Utc::now());
        self.writer.write_parameters_audit(&audit)?;

        let mut per_part: Vec<ComponentSummary> = summaries.into_values().collect();
        per_part.sort_by(|a, b| a.part.cmp(&b.part));

        tracing::info!(
            planned_orders = planned_orders.len(),
            elapsed = ?start.elapsed(),
            "mrp run finished netting"
        );

        Ok(RunSummary {
            run_time: start.elapsed(),
            parameters: audit,
            planned_order_count: planned_orders.len(),
            total_planned_quantity: planned_orders.iter().map(|o| o.quantity).sum(),
            per_part,
        })
    }
}

fn level_record(part: Part, llc: u32, entry: CatalogEntry) -> LevelRecord {
    LevelRecord {
        part,
        llc,
        lead_time_days: entry.lead_time_days,
        pan_size: entry.pan_size,
        shrink_factor: entry.shrink_factor,
        eoq: entry.eoq,
    }
}

/// Active BOM children of `part` as `(component, qtyPer)` pairs — only
/// edges active at `today` participate in explosion, even though all edges
/// (current or historical) participated in level assignment.
fn active_children(graph: &BomGraph, part: &Part, today: NaiveDate) -> Vec<(Part, Decimal)> {
    let Some(node) = graph.find_node(part) else {
        return Vec::new();
    };
    graph
        .arena()
        .children(node)
        .filter(|(_, edge)| edge.bom_edge.is_active(today))
        .map(|(_, edge)| (edge.bom_edge.child_part.clone(), edge.bom_edge.quantity_per))
        .collect()
}

/// Releases the single-run guard on every exit path — success, error, or a
/// cancellation caught by `?` partway through `run_inner`.
struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
