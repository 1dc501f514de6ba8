use super::context::Frame;
use super::session::TraceSession;
use crate::breakpoint::{BreakpointSet, SourceRange};
use crate::error::{Error, Result};
use crate::source::{MethodDescription, TranslationUnit};
use tracing::debug;

const EXIT_MARKER: &str = "returning from method ";

fn violation(method: &MethodDescription, reason: String) -> Error {
    Error::Protocol {
        method: method.display_name.clone(),
        reason,
    }
}

/// Bind every name a log message may reference to a placeholder value.
fn frame_for(method: &MethodDescription) -> Frame {
    let mut frame = Frame::new(method.display_name.clone());
    let names = method
        .parameters
        .iter()
        .chain(method.returns.iter().filter_map(|r| r.referenced_name.as_ref()));
    for name in names {
        frame = frame.bind(name.clone(), format!("<{}>", name));
    }
    frame
}

/// Execution paths through one call: one per distinct return line, plus
/// falling off the end. A debugger stops once per line, so repeated
/// consecutive lines collapse.
fn exit_paths(method: &MethodDescription, body: &SourceRange) -> Vec<Vec<u32>> {
    let start = body.starting_line_number;
    let closing = body.ending_line_number;

    let mut return_lines: Vec<u32> = method
        .returns
        .iter()
        .map(|r| r.range.starting_line_number)
        .collect();
    return_lines.dedup();

    let mut paths: Vec<Vec<u32>> = return_lines
        .into_iter()
        .map(|line| vec![start, line, closing])
        .collect();
    paths.push(vec![start, closing]);

    for path in &mut paths {
        path.dedup();
    }
    paths
}

/// Replay every exit path of `method` and check that each call logs its
/// exit once and leaves depth and the ignore flag as it found them.
pub fn verify_method(breakpoints: &BreakpointSet, main: &SourceRange, method: &MethodDescription) -> Result<()> {
    let Some(body) = method.body.as_ref() else {
        return Ok(());
    };
    let frame = frame_for(method);

    for path in exit_paths(method, body) {
        let mut session = TraceSession::new(breakpoints);
        if !session.hit(&main.file_path, main.starting_line_number, &Frame::new("main"))? {
            return Err(violation(method, "entry point breakpoint did not fire".into()));
        }

        for line in &path {
            session.hit(&body.file_path, *line, &frame)?;
        }

        let exits = session
            .log()
            .iter()
            .filter(|m| m.contains(EXIT_MARKER))
            .count();
        if exits != 1 {
            return Err(violation(
                method,
                format!("path {:?} logged {} exits instead of 1", path, exits),
            ));
        }

        let ctx = session.context();
        let depth = ctx.depth().map_err(|e| violation(method, e.to_string()))?;
        if depth != 0 {
            return Err(violation(
                method,
                format!("path {:?} left call depth at {}", path, depth),
            ));
        }
        if ctx.ignore_exit().map_err(|e| violation(method, e.to_string()))? {
            return Err(violation(
                method,
                format!("path {:?} left the exit flag set", path),
            ));
        }
        debug!("{}: path {:?} balanced", method.display_name, path);
    }
    Ok(())
}

/// Verify every method in `units`; returns how many were checked.
pub fn verify_all(breakpoints: &BreakpointSet, main: &SourceRange, units: &[TranslationUnit]) -> Result<usize> {
    let mut checked = 0;
    for method in units.iter().flat_map(|u| u.methods.iter()) {
        if method.body.is_some() {
            verify_method(breakpoints, main, method)?;
            checked += 1;
        }
    }
    Ok(checked)
}
