#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use expandable_text::{LayoutError, LineLayout, ListenerHandle};

pub use expandable_text::strip_ansi;

/// Line-layout oracle with preset line end offsets.
pub struct FixedLines(pub Vec<usize>);

impl LineLayout for FixedLines {
    fn line_count(&self) -> usize {
        self.0.len()
    }

    fn line_end(&self, line: usize) -> Result<usize, LayoutError> {
        Ok(self.0.get(line).copied().unwrap_or(0))
    }
}

/// Oracle that fails every query, like a host whose layout isn't ready.
pub struct UnavailableLayout;

impl LineLayout for UnavailableLayout {
    fn line_count(&self) -> usize {
        0
    }

    fn line_end(&self, _line: usize) -> Result<usize, LayoutError> {
        Err(LayoutError::NotLaidOut)
    }
}

pub type Calls = Rc<RefCell<Vec<bool>>>;

pub fn recording_listener() -> (ListenerHandle, Calls) {
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    let listener: ListenerHandle = Rc::new(move |expanded: bool| sink.borrow_mut().push(expanded));
    (listener, calls)
}
