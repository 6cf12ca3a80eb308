// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collapsible tree view driven by simulated input.
//!
//! This example shows how a host wires up `understory_tree_view`:
//! - forwarding pointer events to a `TreeViewDriver`,
//! - redrawing when the driver asks for it,
//! - running a tick timer between `START_TICKS` and `STOP_TICKS`.
//!
//! A `RecordingSurface` stands in for a real renderer; each frame's draw
//! calls are printed instead of rasterized.
//!
//! Run:
//! - `cargo run -p understory_demos --example tree_view`
//! - `RUST_LOG=understory_tree_view=debug cargo run -p understory_demos --example tree_view`

use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use understory_tree_view::recording::{DrawOp, FixedWidthShaper, RecordingSurface};
use understory_tree_view::{FrameRequests, Node, TreeViewDriver};
use understory_tree_walk::depth_first_nodes;

/// Milliseconds between animation ticks.
const TICK_MS: u64 = 16;

/// A minimal host: owns the clock, the tree, and the redraw/tick flags.
struct Host {
    driver: TreeViewDriver,
    tree: Node,
    client: Rect,
    now: u64,
    needs_redraw: bool,
    ticking: bool,
}

impl Host {
    fn new(tree: Node, client: Rect) -> Self {
        Self {
            driver: TreeViewDriver::new(),
            tree,
            client,
            now: 0,
            needs_redraw: true,
            ticking: false,
        }
    }

    fn apply(&mut self, requests: FrameRequests) {
        if requests.contains(FrameRequests::REDRAW) {
            self.needs_redraw = true;
        }
        if requests.contains(FrameRequests::START_TICKS) {
            self.ticking = true;
        }
        if requests.contains(FrameRequests::STOP_TICKS) {
            self.ticking = false;
        }
    }

    fn pointer_move(&mut self, p: Point) {
        let requests = self.driver.on_pointer_move(p);
        self.apply(requests);
    }

    fn click(&mut self, p: Point) {
        println!("-- click at ({}, {}) t={}ms", p.x, p.y, self.now);
        let requests = self.driver.on_pointer_down(p);
        self.apply(requests);
    }

    /// Draw if a redraw is pending, printing what was drawn when `verbose`.
    fn paint(&mut self, verbose: bool) {
        if !self.needs_redraw {
            return;
        }
        self.needs_redraw = false;

        let mut surface = RecordingSurface::default();
        let mut shaper = FixedWidthShaper::default();
        match self.driver.render(
            &mut surface,
            &mut shaper,
            self.client,
            &mut self.tree,
            self.now,
        ) {
            Ok(requests) => self.apply(requests),
            Err(err) => {
                // Retry on the next paint; the driver reports any tick
                // change with the first frame that succeeds.
                eprintln!("frame at t={}ms dropped: {err}", self.now);
                self.needs_redraw = true;
                return;
            }
        }

        if verbose {
            print_frame(self.now, self.client, &surface);
        }
    }

    /// Advance the clock, ticking and repainting until animations settle.
    fn run_for(&mut self, millis: u64) {
        let end = self.now + millis;
        self.paint(true);
        while self.now < end {
            self.now += TICK_MS;
            if self.ticking {
                let requests = self.driver.on_tick(&self.tree, self.now);
                self.apply(requests);
                self.paint(!self.ticking);
                if !self.ticking {
                    println!("   (animation settled at t={}ms)", self.now);
                }
            }
        }
        self.paint(true);
    }
}

fn print_frame(now: u64, client: Rect, surface: &RecordingSurface) {
    println!("frame t={now}ms:");
    for op in &surface.ops {
        match op {
            DrawOp::Text { origin, text, .. } => {
                let marker = if text.truncated { " (trimmed)" } else { "" };
                println!(
                    "   {:>6.1}, {:>6.1}  {}{marker}",
                    origin.x, origin.y, text.text
                );
            }
            DrawOp::Fill { rect, .. } if *rect != client => {
                println!("   hover     {rect:?}");
            }
            DrawOp::Rect { rect, .. } => {
                println!("   group     {rect:?}");
            }
            _ => {}
        }
    }
}

fn sample_tree() -> Node {
    let mut root = Node::new("root").expanded();
    let child1 = root.push(Node::new("child1"));
    child1.push(Node::new("grandchild1 of 1"));
    child1.push(Node::new("grandchild2 of 1"));
    let child2 = root.push(Node::new("child2"));
    child2.push(Node::new("grandchild1 of 2"));
    child2.push(Node::new("grandchild2 of 2"));
    child2.push(Node::new("grandchild3 of 2"));
    let child3 = root.push(Node::new("child3"));
    child3.push(Node::new("grandchild1 of 3"));
    root
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();

    let tree = sample_tree();
    for visit in depth_first_nodes(&tree) {
        println!("{}{}", "  ".repeat(visit.depth), visit.node.label());
    }

    // Narrow enough that the longer labels get trimmed.
    let mut host = Host::new(tree, Rect::new(0.0, 0.0, 110.0, 200.0));
    host.run_for(0);

    // Hover child2, then open it. Its expander is one indent in, two rows down.
    host.pointer_move(Point::new(60.0, 50.0));
    host.click(Point::new(18.0, 50.0));
    host.run_for(150);

    // Open child1, then click it again mid-animation; the second click is ignored.
    host.click(Point::new(18.0, 30.0));
    host.run_for(32);
    host.click(Point::new(18.0, 30.0));
    host.run_for(150);

    // Collapse the root; everything below it folds away.
    host.click(Point::new(8.0, 12.0));
    host.run_for(150);
}
