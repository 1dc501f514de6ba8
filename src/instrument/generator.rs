use super::engine::Instrumenter;
use super::initializer::EntryPointInitializer;
use crate::breakpoint::{timestamp_now, xml, BreakpointRecord, BreakpointSet, SourceRange};
use crate::error::{Error, Result};
use crate::source::{MethodDescription, TranslationUnit};
use std::io::Write;
use tracing::{debug, info};

/// Counters for one generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub methods: usize,
    pub skipped: usize,
    pub emitted: usize,
    pub duplicates: usize,
}

/// Feeds the initializer and the instrumenter through one [`BreakpointSet`]
/// and writes every newly accepted breakpoint to `out` straight away.
pub struct Generator<W: Write> {
    out: W,
    breakpoints: BreakpointSet,
    initializer: EntryPointInitializer,
    instrumenter: Instrumenter,
    clock: fn() -> i64,
    bucket: bool,
    started: bool,
    summary: RunSummary,
}

impl<W: Write> Generator<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            breakpoints: BreakpointSet::new(),
            initializer: EntryPointInitializer::new(),
            instrumenter: Instrumenter::new(),
            clock: timestamp_now,
            bucket: false,
            started: false,
            summary: RunSummary::default(),
        }
    }

    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self.instrumenter = Instrumenter::with_clock(clock);
        self
    }

    /// Wrap the stream in an `.xcbkptlist` bucket.
    pub fn with_bucket(mut self, bucket: bool) -> Self {
        self.bucket = bucket;
        self
    }

    pub fn breakpoints(&self) -> &BreakpointSet {
        &self.breakpoints
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    fn emit(&mut self, record: BreakpointRecord) -> Result<bool> {
        let id = record.id();
        if !self.breakpoints.insert(record) {
            self.summary.duplicates += 1;
            return Ok(false);
        }

        if !self.started {
            self.started = true;
            if self.bucket {
                self.out
                    .write_all(xml::bucket_header().as_bytes())
                    .map_err(Error::Output)?;
            }
        }
        if let Some(stored) = self.breakpoints.get(&id) {
            xml::write_document(&mut self.out, stored).map_err(Error::Output)?;
            self.summary.emitted += 1;
        }
        Ok(true)
    }

    /// Install the entry-point breakpoint. Fails on a second call.
    pub fn initialize(&mut self, main: &SourceRange) -> Result<bool> {
        let record = self.initializer.install(main, (self.clock)())?;
        info!(
            "Entry point at {}:{}",
            main.file_path, main.starting_line_number
        );
        self.emit(record)
    }

    /// Offer all breakpoints for `method`; returns how many were new.
    pub fn instrument(&mut self, method: &MethodDescription) -> Result<usize> {
        self.summary.methods += 1;
        if method.body.is_none() {
            debug!("Skipping {}: no body", method.display_name);
            self.summary.skipped += 1;
            return Ok(0);
        }

        debug!("visit {}", method.display_name);
        let mut accepted = 0;
        for record in self.instrumenter.instrument(method) {
            if self.emit(record)? {
                accepted += 1;
            }
        }
        Ok(accepted)
    }

    /// Install `main`, then instrument every method in order.
    ///
    /// `main` comes from [`crate::source::EntryPointFinder::find`], which
    /// must succeed before anything is written.
    pub fn run(&mut self, main: &SourceRange, units: &[TranslationUnit]) -> Result<RunSummary> {
        self.initialize(main)?;

        for unit in units {
            for method in &unit.methods {
                self.instrument(method)?;
            }
        }

        info!(
            "Instrumented {} methods ({} skipped), {} breakpoints written, {} duplicates dropped",
            self.summary.methods, self.summary.skipped, self.summary.emitted, self.summary.duplicates
        );
        Ok(self.summary)
    }

    /// Close the bucket if one was requested and hand back the writer.
    pub fn finish(mut self) -> Result<(W, BreakpointSet)> {
        if self.bucket {
            if !self.started {
                self.out
                    .write_all(xml::bucket_header().as_bytes())
                    .map_err(Error::Output)?;
            }
            self.out
                .write_all(xml::bucket_footer().as_bytes())
                .map_err(Error::Output)?;
        }
        self.out.flush().map_err(Error::Output)?;
        Ok((self.out, self.breakpoints))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{EntryPointFinder, FunctionDescription, DEFAULT_MAIN_FILE_PATTERN};

    fn fixed_clock() -> i64 {
        42
    }

    fn main_unit() -> TranslationUnit {
        TranslationUnit {
            file_path: "/p/main.m".into(),
            functions: vec![FunctionDescription {
                name: "main".into(),
                range: SourceRange::new("/p/main.m", (11, 1), (17, 1)),
            }],
            methods: Vec::new(),
        }
    }

    fn foo_unit() -> TranslationUnit {
        TranslationUnit {
            file_path: "/p/Foo.m".into(),
            functions: Vec::new(),
            methods: vec![MethodDescription::new(
                "-[Foo bar:]",
                SourceRange::new("/p/Foo.m", (10, 20), (15, 1)),
            )
            .with_parameter("x")
            .with_return(SourceRange::new("/p/Foo.m", (13, 5), (13, 13)), Some("x"))],
        }
    }

    fn main_range() -> SourceRange {
        SourceRange::new("/p/main.m", (11, 1), (17, 1))
    }

    fn finder() -> EntryPointFinder {
        EntryPointFinder::new(DEFAULT_MAIN_FILE_PATTERN).unwrap()
    }

    fn starting_lines(output: &str) -> Vec<String> {
        output
            .lines()
            .filter_map(|l| l.trim().strip_prefix("startingLineNumber = "))
            .map(|v| v.trim_matches('"').to_string())
            .collect()
    }

    #[test]
    fn initializer_comes_first_then_method_in_order() {
        let units = [foo_unit(), main_unit()];
        let main = finder().find(&units).unwrap();
        let mut generator = Generator::new(Vec::<u8>::new()).with_clock(fixed_clock);
        let summary = generator.run(&main, &units).unwrap();
        assert_eq!(summary.emitted, 4);
        assert_eq!(summary.methods, 1);

        let (out, set) = generator.finish().unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(starting_lines(&text), ["11", "10", "13", "15"]);
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn duplicates_are_dropped_silently() {
        let method = MethodDescription::new("-[Foo one]", SourceRange::new("f.m", (4, 14), (4, 30)))
            .with_return(SourceRange::new("f.m", (4, 16), (4, 24)), None);
        let mut generator = Generator::new(Vec::<u8>::new()).with_clock(fixed_clock);
        assert_eq!(generator.instrument(&method).unwrap(), 1);
        assert_eq!(generator.summary().duplicates, 2);
        // The entry breakpoint was offered first and kept.
        let kept = generator.breakpoints().get("f.m4").unwrap();
        assert!(kept.actions()[0].payload().contains("entering method"));
    }

    #[test]
    fn skipped_methods_produce_nothing() {
        let mut method = MethodDescription::new("-[Foo abstract]", SourceRange::default());
        method.body = None;
        let mut generator = Generator::new(Vec::<u8>::new());
        assert_eq!(generator.instrument(&method).unwrap(), 0);
        assert_eq!(generator.summary().skipped, 1);
        let (out, _) = generator.finish().unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn second_entry_point_stops_the_run() {
        let mut generator = Generator::new(Vec::<u8>::new());
        generator.initialize(&main_range()).unwrap();
        let err = generator
            .run(&SourceRange::new("/q/main.c", (3, 1), (9, 1)), &[foo_unit()])
            .unwrap_err();
        assert!(matches!(err, Error::AmbiguousEntryPoint { .. }));
        assert_eq!(generator.summary().methods, 0);
        assert_eq!(generator.breakpoints().len(), 1);
    }

    #[test]
    fn returns_sharing_a_line_keep_one_breakpoint() {
        // if (a) return x; else return y;
        let method = MethodDescription::new("-[Foo pick:]", SourceRange::new("f.m", (2, 20), (6, 1)))
            .with_parameter("a")
            .with_return(SourceRange::new("f.m", (4, 12), (4, 20)), Some("x"))
            .with_return(SourceRange::new("f.m", (4, 27), (4, 35)), Some("y"));
        let mut generator = Generator::new(Vec::<u8>::new()).with_clock(fixed_clock);
        assert_eq!(generator.instrument(&method).unwrap(), 3);
        assert_eq!(generator.summary().duplicates, 1);

        let kept = generator.breakpoints().get("f.m4").unwrap();
        assert_eq!(kept.source_range().starting_column_number, 12);
        assert!(kept.actions()[0].payload().ends_with("value: @x@"));
    }

    #[test]
    fn bucket_wraps_the_stream() {
        let mut generator = Generator::new(Vec::<u8>::new()).with_bucket(true);
        generator.run(&main_range(), &[main_unit()]).unwrap();
        let (out, _) = generator.finish().unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Bucket"));
        assert!(text.ends_with("   </Breakpoints>\n</Bucket>\n"));
        assert_eq!(text.matches("<BreakpointProxy").count(), 1);
    }
}
