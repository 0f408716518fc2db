// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A "process the first N jobs" checklist driven by `TopAnchoredRangeSelection`.
//!
//! Jobs are grouped under headers. Clicking a job's checkbox moves the end of
//! the selected prefix to it; clicking a header toggles the whole group.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_demos --example prefix_checklist`

use std::cell::Cell;
use std::rc::Rc;

use understory_selection::{KeyedItem, SelectionModel, TopAnchoredRangeSelection};

#[derive(Debug)]
struct Job {
    id: String,
    title: &'static str,
}

impl KeyedItem for Job {
    fn key(&self) -> Option<&str> {
        Some(self.id.as_str())
    }
}

/// A header spanning `count` jobs starting at `start`.
struct Group {
    name: &'static str,
    start: usize,
    count: usize,
}

enum Click {
    Job(usize),
    Header(usize),
}

fn render(selection: &TopAnchoredRangeSelection<Job>, groups: &[Group]) {
    for group in groups {
        let mark = if selection.is_range_selected(group.start, group.count) {
            "[x]"
        } else {
            "[ ]"
        };
        println!("{mark} {}", group.name);
        for (index, job) in selection
            .items()
            .iter()
            .enumerate()
            .skip(group.start)
            .take(group.count)
        {
            let mark = if selection.is_index_selected(index) {
                "[x]"
            } else {
                "[ ]"
            };
            println!("    {mark} {} ({})", job.title, job.id);
        }
    }
    println!(
        "{} of {} selected\n",
        selection.selected_count(),
        selection.items().len()
    );
}

fn main() {
    env_logger::init();

    let titles = [
        "fetch sources",
        "verify checksums",
        "unpack",
        "configure",
        "build",
        "test",
        "package",
    ];
    let jobs: Vec<Job> = titles
        .into_iter()
        .enumerate()
        .map(|(i, title)| Job {
            id: format!("job-{i}"),
            title,
        })
        .collect();
    let groups = [
        Group {
            name: "Prepare",
            start: 0,
            count: 3,
        },
        Group {
            name: "Build",
            start: 3,
            count: 2,
        },
        Group {
            name: "Ship",
            start: 5,
            count: 2,
        },
    ];

    let changes = Rc::new(Cell::new(0_u32));
    let counter = changes.clone();
    let mut selection = TopAnchoredRangeSelection::with_on_selection_changed(move || {
        counter.set(counter.get() + 1);
    });
    selection.set_items(jobs, true);

    let clicks = [
        Click::Job(3),
        Click::Job(3),
        Click::Header(2),
        Click::Header(1),
        Click::Job(0),
        Click::Header(0),
    ];
    render(&selection, &groups);
    for click in clicks {
        match click {
            Click::Job(index) => {
                println!("> click job {index}");
                selection.toggle_index_selected(index);
            }
            Click::Header(group) => {
                let group = &groups[group];
                println!("> click header {}", group.name);
                selection.toggle_range_selected(group.start, group.count);
            }
        }
        render(&selection, &groups);
    }
    println!("{} change notifications", changes.get());
}
