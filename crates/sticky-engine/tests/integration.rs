//! Integration tests - sticky regions driven through the page
//!
//! Tests the complete workflow: tree mutation → lifecycle events →
//! registration → measured sizes → stacking → styles on the tree

use std::collections::HashMap;

use anyhow::Result;
use sticky_engine::dom::{EventDispatcher, NodeId};
use sticky_engine::layout::TableRunPolicy;
use sticky_engine::{Config, Page, StickyElement, StickyEvent};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn sizes(entries: &[(NodeId, f32)]) -> HashMap<NodeId, (f32, f32)> {
    entries.iter().map(|&(node, height)| (node, (800.0, height))).collect()
}

/// A connected `<sticky-wrapper>` under `<body>`
fn page_with_wrapper(config: Config) -> Result<(Page, NodeId)> {
    init_tracing();
    let mut page = Page::new(config)?;
    let wrapper = page.create_element("sticky-wrapper")?;
    let body = page.body();
    page.append_child(body, wrapper)?;
    Ok((page, wrapper))
}

/// `<sticky-header><div></div></sticky-header>` appended to `parent`
fn plain_header(page: &mut Page, parent: NodeId) -> Result<(NodeId, NodeId)> {
    let header = page.create_element("sticky-header")?;
    let inner = page.create_element("div")?;
    page.append_child(header, inner)?;
    page.append_child(parent, header)?;
    Ok((header, inner))
}

/// `<table><thead><tr>` with one `<th><sticky-table-header>` per column
fn table_header_row(page: &mut Page, parent: NodeId, columns: usize) -> Result<Vec<(NodeId, NodeId)>> {
    let table = page.create_element("table")?;
    let thead = page.create_element("thead")?;
    let tr = page.create_element("tr")?;
    page.append_child(table, thead)?;
    page.append_child(thead, tr)?;

    let mut cells = Vec::new();
    for _ in 0..columns {
        let th = page.create_element("th")?;
        let header = page.create_element("sticky-table-header")?;
        let label = page.create_text("Column");
        page.append_child(header, label)?;
        page.append_child(th, header)?;
        page.append_child(tr, th)?;
        cells.push((header, th));
    }

    page.append_child(parent, table)?;
    Ok(cells)
}

fn offsets(page: &Page, nodes: &[NodeId]) -> Vec<Option<f32>> {
    nodes.iter().map(|&n| page.pinning_offset(n)).collect()
}

// ============================================================================
// PLAIN HEADERS
// ============================================================================

#[test]
fn test_unknown_height_then_measured() -> Result<()> {
    let (mut page, wrapper) = page_with_wrapper(Config::default())?;
    let (h1, i1) = plain_header(&mut page, wrapper)?;
    let (h2, i2) = plain_header(&mut page, wrapper)?;
    let (h3, i3) = plain_header(&mut page, wrapper)?;

    // The second header has not been measured yet
    page.report_sizes(&sizes(&[(i1, 40.0), (i3, 30.0)]));
    assert_eq!(offsets(&page, &[h1, h2, h3]), vec![Some(0.0), Some(40.0), Some(40.0)]);
    assert_eq!(page.reserved_padding(wrapper), Some(70.0));

    page.report_sizes(&sizes(&[(i1, 40.0), (i2, 20.0), (i3, 30.0)]));
    assert_eq!(offsets(&page, &[h1, h2, h3]), vec![Some(0.0), Some(40.0), Some(60.0)]);
    assert_eq!(page.reserved_padding(wrapper), Some(90.0));
    Ok(())
}

#[test]
fn test_headers_stack_without_overlap() -> Result<()> {
    let (mut page, wrapper) = page_with_wrapper(Config::default())?;
    let heights = [48.0, 32.0, 24.0, 24.0, 56.0];

    let mut headers = Vec::new();
    let mut measured = Vec::new();
    for height in heights {
        let (header, inner) = plain_header(&mut page, wrapper)?;
        headers.push(header);
        measured.push((inner, height));
    }
    page.report_sizes(&sizes(&measured));

    let mut expected = 0.0;
    for (&header, height) in headers.iter().zip(heights) {
        assert_eq!(page.pinning_offset(header), Some(expected));
        expected += height;
    }
    assert_eq!(page.reserved_padding(wrapper), Some(184.0));
    Ok(())
}

#[test]
fn test_nested_headers_follow_document_order() -> Result<()> {
    let (mut page, wrapper) = page_with_wrapper(Config::default())?;
    let section = page.create_element("section")?;
    let (outer, outer_inner) = plain_header(&mut page, section)?;
    let article = page.create_element("article")?;
    let (nested, nested_inner) = plain_header(&mut page, article)?;
    page.append_child(section, article)?;
    page.append_child(wrapper, section)?;

    page.report_sizes(&sizes(&[(outer_inner, 50.0), (nested_inner, 26.0)]));
    assert_eq!(page.pinning_offset(outer), Some(0.0));
    assert_eq!(page.pinning_offset(nested), Some(50.0));
    assert_eq!(page.reserved_padding(wrapper), Some(76.0));
    Ok(())
}

#[test]
fn test_offsets_ignore_registration_order() -> Result<()> {
    let (mut page, wrapper) = page_with_wrapper(Config::default())?;
    let (a, ia) = plain_header(&mut page, wrapper)?;
    let (b, ib) = plain_header(&mut page, wrapper)?;
    let (c, ic) = plain_header(&mut page, wrapper)?;
    page.report_sizes(&sizes(&[(ia, 10.0), (ib, 20.0), (ic, 30.0)]));
    assert_eq!(offsets(&page, &[a, b, c]), vec![Some(0.0), Some(10.0), Some(30.0)]);

    // Moving `a` to the end re-registers it last and moves it last in the document
    page.append_child(wrapper, a)?;
    page.report_sizes(&sizes(&[(ia, 10.0), (ib, 20.0), (ic, 30.0)]));
    assert_eq!(offsets(&page, &[b, c, a]), vec![Some(0.0), Some(20.0), Some(50.0)]);
    assert_eq!(page.reserved_padding(wrapper), Some(60.0));
    Ok(())
}

#[test]
fn test_restack_is_idempotent() -> Result<()> {
    let (mut page, wrapper) = page_with_wrapper(Config::default())?;
    let (_, i1) = plain_header(&mut page, wrapper)?;
    let (_, i2) = plain_header(&mut page, wrapper)?;
    page.report_sizes(&sizes(&[(i1, 18.0), (i2, 22.0)]));

    let first = page.restack(wrapper).expect("wrapper exists");
    let second = page.restack(wrapper).expect("wrapper exists");
    assert_eq!(first, second);
    assert_eq!(second.total_reserved_height, 40.0);
    Ok(())
}

// ============================================================================
// BATCHING
// ============================================================================

#[test]
fn test_size_batch_runs_one_pass() -> Result<()> {
    let (mut page, wrapper) = page_with_wrapper(Config::default())?;
    let measured: Vec<_> = (0..4)
        .map(|_| plain_header(&mut page, wrapper).map(|(_, inner)| inner))
        .collect::<Result<_>>()?;
    let before = page.wrapper(wrapper).expect("wrapper exists").stats();

    let frame: Vec<_> = measured.iter().map(|&inner| (inner, 25.0)).collect();
    page.report_sizes(&sizes(&frame));

    let after = page.wrapper(wrapper).expect("wrapper exists").stats();
    assert_eq!(after.passes, before.passes + 1);
    assert_eq!(after.batches, before.batches + 1);

    // An unchanged frame reports nothing and triggers no pass
    page.report_sizes(&sizes(&frame));
    assert_eq!(page.wrapper(wrapper).expect("wrapper exists").stats(), after);
    Ok(())
}

#[test]
fn test_connecting_subtree_restacks_once() -> Result<()> {
    init_tracing();
    let mut page = Page::new(Config::default())?;
    let wrapper = page.create_element("sticky-wrapper")?;
    let headers: Vec<_> = (0..3)
        .map(|_| plain_header(&mut page, wrapper).map(|(header, _)| header))
        .collect::<Result<_>>()?;

    // Nothing is registered while the wrapper is detached
    assert!(page.wrapper(wrapper).expect("wrapper exists").registry().is_empty());

    let body = page.body();
    page.append_child(body, wrapper)?;

    let state = page.wrapper(wrapper).expect("wrapper exists");
    assert_eq!(state.registry().len(), 3);
    assert_eq!(state.stats().passes, 1);
    assert_eq!(offsets(&page, &headers), vec![Some(0.0); 3]);
    assert_eq!(page.reserved_padding(wrapper), Some(0.0));
    Ok(())
}

// ============================================================================
// DETACH
// ============================================================================

#[test]
fn test_detached_header_is_excluded() -> Result<()> {
    let (mut page, wrapper) = page_with_wrapper(Config::default())?;
    let (h1, i1) = plain_header(&mut page, wrapper)?;
    let (h2, i2) = plain_header(&mut page, wrapper)?;
    let (h3, i3) = plain_header(&mut page, wrapper)?;
    page.report_sizes(&sizes(&[(i1, 40.0), (i2, 20.0), (i3, 30.0)]));

    page.remove(h2)?;

    let state = page.wrapper(wrapper).expect("wrapper exists");
    assert!(!state.registry().contains(h2));
    assert!(!state.adapter().is_observing(h2));
    assert_eq!(state.state().offset_of(h2), None);
    assert_eq!(offsets(&page, &[h1, h3]), vec![Some(0.0), Some(40.0)]);
    assert_eq!(page.reserved_padding(wrapper), Some(70.0));

    // Sizes for the removed header no longer matter
    page.report_sizes(&sizes(&[(i2, 500.0)]));
    assert_eq!(page.reserved_padding(wrapper), Some(70.0));
    Ok(())
}

#[test]
fn test_reattached_header_is_measured_again() -> Result<()> {
    let (mut page, wrapper) = page_with_wrapper(Config::default())?;
    let (h1, i1) = plain_header(&mut page, wrapper)?;
    let (h2, i2) = plain_header(&mut page, wrapper)?;
    page.report_sizes(&sizes(&[(i1, 40.0), (i2, 20.0)]));

    page.remove(h1)?;
    page.append_child(wrapper, h1)?;
    assert_eq!(page.pinning_offset(h1), Some(20.0));
    assert_eq!(page.reserved_padding(wrapper), Some(20.0));

    // Same size as before, but the fresh subscription reports it
    page.report_sizes(&sizes(&[(i1, 40.0), (i2, 20.0)]));
    assert_eq!(page.reserved_padding(wrapper), Some(60.0));
    Ok(())
}

#[test]
fn test_removing_wrapper_unregisters_headers() -> Result<()> {
    let (mut page, wrapper) = page_with_wrapper(Config::default())?;
    let (h1, i1) = plain_header(&mut page, wrapper)?;
    let (h2, i2) = plain_header(&mut page, wrapper)?;
    page.report_sizes(&sizes(&[(i1, 40.0), (i2, 20.0)]));

    page.remove(wrapper)?;
    let state = page.wrapper(wrapper).expect("wrapper exists");
    assert!(state.registry().is_empty());
    assert_eq!(state.adapter().observer().observed_count(), 0);
    let stats = state.stats();

    // A detached region ignores measurements
    page.report_sizes(&sizes(&[(i1, 50.0), (i2, 30.0)]));
    assert_eq!(page.wrapper(wrapper).expect("wrapper exists").stats(), stats);

    // Removing a detached node is a no-op
    page.remove(wrapper)?;

    // Reconnecting rebuilds the region from scratch
    let body = page.body();
    page.append_child(body, wrapper)?;
    assert_eq!(page.wrapper(wrapper).expect("wrapper exists").registry().len(), 2);
    page.report_sizes(&sizes(&[(i1, 50.0), (i2, 30.0)]));
    assert_eq!(offsets(&page, &[h1, h2]), vec![Some(0.0), Some(50.0)]);
    assert_eq!(page.reserved_padding(wrapper), Some(80.0));
    Ok(())
}

#[test]
fn test_header_content_added_after_connect() -> Result<()> {
    let (mut page, wrapper) = page_with_wrapper(Config::default())?;
    let empty = page.create_element("sticky-header")?;
    page.append_child(wrapper, empty)?;
    let (h2, _) = plain_header(&mut page, wrapper)?;

    let state = page.wrapper(wrapper).expect("wrapper exists");
    assert_eq!(state.adapter().measured_node(empty), Some(empty));

    let inner = page.create_element("div")?;
    page.append_child(empty, inner)?;
    let state = page.wrapper(wrapper).expect("wrapper exists");
    assert_eq!(state.adapter().measured_node(empty), Some(inner));

    page.report_sizes(&sizes(&[(inner, 40.0)]));
    assert_eq!(page.pinning_offset(h2), Some(40.0));

    // Losing the content falls back to the header's own box
    page.remove(inner)?;
    let state = page.wrapper(wrapper).expect("wrapper exists");
    assert_eq!(state.adapter().measured_node(empty), Some(empty));
    Ok(())
}

// ============================================================================
// TABLE HEADERS
// ============================================================================

#[test]
fn test_table_header_row_overlaps() -> Result<()> {
    let (mut page, wrapper) = page_with_wrapper(Config::default())?;
    let (title, title_inner) = plain_header(&mut page, wrapper)?;
    let cells = table_header_row(&mut page, wrapper, 2)?;
    let (after, after_inner) = plain_header(&mut page, wrapper)?;

    let (th1, th2) = (cells[0].1, cells[1].1);
    page.report_sizes(&sizes(&[(title_inner, 40.0), (th1, 25.0), (th2, 30.0), (after_inner, 20.0)]));

    // Both cells pin at the offset reached before the row
    assert_eq!(page.pinning_offset(th1), Some(40.0));
    assert_eq!(page.pinning_offset(th2), Some(40.0));
    // The row's height is not added
    assert_eq!(page.pinning_offset(after), Some(40.0));
    assert_eq!(page.pinning_offset(title), Some(0.0));
    assert_eq!(page.reserved_padding(wrapper), Some(60.0));

    // The cell carries sticky positioning, not the header inside it
    let style = page.tree().style(th1).expect("cell is an element");
    assert_eq!(style.get("position"), Some("sticky"));
    assert_eq!(style.get("z-index"), Some("1"));
    assert_eq!(page.pinning_offset(cells[0].0), Some(0.0));
    Ok(())
}

#[test]
fn test_table_row_accumulate_once() -> Result<()> {
    let config = Config { table_run_policy: TableRunPolicy::AccumulateOnce, ..Config::default() };
    let (mut page, wrapper) = page_with_wrapper(config)?;
    let (_, title_inner) = plain_header(&mut page, wrapper)?;
    let cells = table_header_row(&mut page, wrapper, 2)?;
    let (after, after_inner) = plain_header(&mut page, wrapper)?;

    page.report_sizes(&sizes(&[
        (title_inner, 40.0),
        (cells[0].1, 25.0),
        (cells[1].1, 30.0),
        (after_inner, 20.0),
    ]));

    assert_eq!(page.pinning_offset(cells[1].1), Some(40.0));
    assert_eq!(page.pinning_offset(after), Some(70.0));
    assert_eq!(page.reserved_padding(wrapper), Some(90.0));
    Ok(())
}

#[test]
fn test_second_header_in_measured_cell() -> Result<()> {
    let config = Config { table_run_policy: TableRunPolicy::AccumulateOnce, ..Config::default() };
    let (mut page, wrapper) = page_with_wrapper(config)?;
    let cells = table_header_row(&mut page, wrapper, 1)?;
    let (first, th) = cells[0];
    let (after, after_inner) = plain_header(&mut page, wrapper)?;
    page.report_sizes(&sizes(&[(th, 28.0), (after_inner, 20.0)]));
    assert_eq!(page.pinning_offset(after), Some(28.0));

    let second = page.create_element("sticky-table-header")?;
    page.append_child(th, second)?;
    page.remove(first)?;

    // The cell did not change size, yet its new header still learns it
    page.report_sizes(&sizes(&[(th, 28.0), (after_inner, 20.0)]));
    let state = page.wrapper(wrapper).expect("wrapper exists");
    assert_eq!(state.registry().height_of(second), 28.0);
    assert_eq!(page.pinning_offset(after), Some(28.0));
    assert_eq!(page.reserved_padding(wrapper), Some(48.0));
    Ok(())
}

#[test]
fn test_table_header_outside_cell_is_inert() -> Result<()> {
    let (mut page, wrapper) = page_with_wrapper(Config::default())?;
    let div = page.create_element("div")?;
    let header = page.create_element("sticky-table-header")?;
    page.append_child(div, header)?;
    page.append_child(wrapper, div)?;

    let state = page.wrapper(wrapper).expect("wrapper exists");
    assert!(state.registry().is_empty());
    assert_eq!(page.tree().style(div).and_then(|s| s.get("position")), None);

    // Removing it again is harmless
    page.remove(div)?;
    Ok(())
}

#[test]
fn test_table_header_detach() -> Result<()> {
    let (mut page, wrapper) = page_with_wrapper(Config::default())?;
    let cells = table_header_row(&mut page, wrapper, 2)?;
    let (after, after_inner) = plain_header(&mut page, wrapper)?;
    page.report_sizes(&sizes(&[(cells[0].1, 25.0), (cells[1].1, 25.0), (after_inner, 20.0)]));

    let (header, cell) = cells[0];
    page.remove(header)?;

    let state = page.wrapper(wrapper).expect("wrapper exists");
    assert!(!state.registry().contains(header));
    assert!(!state.adapter().observer().is_observing(cell));
    assert!(state.registry().contains(cells[1].0));
    assert_eq!(page.pinning_offset(after), Some(0.0));
    Ok(())
}

// ============================================================================
// REGIONS & EVENTS
// ============================================================================

#[test]
fn test_nested_wrappers_are_isolated() -> Result<()> {
    let (mut page, outer) = page_with_wrapper(Config::default())?;
    let (a, ia) = plain_header(&mut page, outer)?;
    let inner = page.create_element("sticky-wrapper")?;
    page.append_child(outer, inner)?;
    let (b, ib) = plain_header(&mut page, inner)?;

    page.report_sizes(&sizes(&[(ia, 30.0), (ib, 50.0)]));

    let outer_state = page.wrapper(outer).expect("outer exists");
    let inner_state = page.wrapper(inner).expect("inner exists");
    assert!(outer_state.registry().contains(a));
    assert!(!outer_state.registry().contains(b));
    assert!(inner_state.registry().contains(b));

    assert_eq!(page.pinning_offset(b), Some(0.0));
    assert_eq!(page.reserved_padding(outer), Some(30.0));
    assert_eq!(page.reserved_padding(inner), Some(50.0));
    Ok(())
}

#[test]
fn test_events_stop_at_wrapper() -> Result<()> {
    let (mut page, wrapper) = page_with_wrapper(Config::default())?;
    let (header, _) = plain_header(&mut page, wrapper)?;

    assert!(page.dispatch_event(StickyEvent::HeaderConnected.to_event(header)));
    assert!(!page.dispatch_event(StickyEvent::WrapperConnected.to_event(wrapper)));

    // A header outside any wrapper has nobody to register with
    let body = page.body();
    let (stray, _) = plain_header(&mut page, body)?;
    assert!(!page.dispatch_event(StickyEvent::HeaderConnected.to_event(stray)));
    assert_eq!(page.closest_wrapper(stray), None);
    assert_eq!(page.element_kind(stray), Some(StickyElement::Header));
    Ok(())
}

#[test]
fn test_region_lives_in_shadow_root() -> Result<()> {
    let (mut page, wrapper) = page_with_wrapper(Config::default())?;
    let (header, _) = plain_header(&mut page, wrapper)?;

    let scroll = page.wrapper(wrapper).expect("wrapper exists").scroll();
    let shadow = page.tree().shadow_root(wrapper).expect("shadow root attached");
    assert_eq!(shadow.first_child(), Some(scroll.region()));
    assert_eq!(scroll.slotted(page.tree()), vec![header]);

    let style = page.tree().style(scroll.region()).expect("region is an element");
    assert_eq!(style.get("overflow"), Some("auto"));
    assert_eq!(style.get("position"), Some("absolute"));
    Ok(())
}

// ============================================================================
// STYLES & MEASUREMENTS
// ============================================================================

#[test]
fn test_author_style_cannot_unstick() -> Result<()> {
    let (mut page, wrapper) = page_with_wrapper(Config::default())?;
    let (h1, i1) = plain_header(&mut page, wrapper)?;
    let header = page.create_element("sticky-header")?;
    page.set_attribute(header, "style", "position: static; top: 99px; background: white")?;

    let style = page.tree().style(header).expect("header is an element");
    assert_eq!(style.get("position"), Some("sticky"));
    assert_eq!(style.get("z-index"), Some("1"));
    assert_eq!(style.get("background"), Some("white"));

    page.append_child(wrapper, header)?;
    page.report_sizes(&sizes(&[(i1, 40.0)]));
    assert_eq!(page.pinning_offset(header), Some(40.0));

    // Restyling a connected header keeps its computed offset
    page.set_attribute(header, "style", "top: 5px; color: red")?;
    assert_eq!(page.pinning_offset(header), Some(40.0));
    assert_eq!(page.tree().style(header).and_then(|s| s.get("color")), Some("red"));

    // Restyling an anchor target keeps sticky positioning
    page.set_attribute(h1, "style", "position: relative")?;
    assert_eq!(page.tree().style(h1).and_then(|s| s.get("position")), Some("sticky"));
    Ok(())
}

#[test]
fn test_negative_height_is_rejected() -> Result<()> {
    let (mut page, wrapper) = page_with_wrapper(Config::default())?;
    let (_, i1) = plain_header(&mut page, wrapper)?;
    let (h2, _) = plain_header(&mut page, wrapper)?;
    page.report_sizes(&sizes(&[(i1, 40.0)]));

    page.report_sizes(&sizes(&[(i1, -12.0)]));
    assert_eq!(page.pinning_offset(h2), Some(40.0));
    assert_eq!(page.reserved_padding(wrapper), Some(40.0));
    Ok(())
}

#[test]
fn test_valid_height_after_nan_is_applied() -> Result<()> {
    let (mut page, wrapper) = page_with_wrapper(Config::default())?;
    let (_, i1) = plain_header(&mut page, wrapper)?;
    let (h2, _) = plain_header(&mut page, wrapper)?;

    page.report_sizes(&sizes(&[(i1, f32::NAN)]));
    assert_eq!(page.pinning_offset(h2), Some(0.0));

    page.report_sizes(&sizes(&[(i1, 40.0)]));
    assert_eq!(page.pinning_offset(h2), Some(40.0));
    assert_eq!(page.reserved_padding(wrapper), Some(40.0));

    // An invalid report between two equal valid ones changes nothing
    page.report_sizes(&sizes(&[(i1, f32::INFINITY)]));
    page.report_sizes(&sizes(&[(i1, 40.0)]));
    assert_eq!(page.pinning_offset(h2), Some(40.0));
    Ok(())
}

#[test]
fn test_config_from_json() -> Result<()> {
    let config: Config = serde_json::from_str(r#"{ "z-index": 10 }"#)?;
    let (mut page, wrapper) = page_with_wrapper(config)?;
    let (header, _) = plain_header(&mut page, wrapper)?;

    assert_eq!(page.config().table_run_policy, TableRunPolicy::Overlap);
    assert_eq!(page.tree().style(header).and_then(|s| s.get("z-index")), Some("10"));
    Ok(())
}

#[test]
fn test_hierarchy_errors_surface() -> Result<()> {
    let (mut page, wrapper) = page_with_wrapper(Config::default())?;
    let (header, inner) = plain_header(&mut page, wrapper)?;

    assert!(page.append_child(inner, header).is_err());
    // The failed move must not have unregistered the header
    assert!(page.wrapper(wrapper).expect("wrapper exists").registry().contains(header));
    Ok(())
}
