use core_config::{HeightMode, ListConfig};
use core_render::{Command, RenderItemProps, VirtualList, Writer};
use core_terminal::{SizeSource, TerminalSize};
use pretty_assertions::assert_eq;

fn frame_for(total: usize, selected: usize) -> core_render::ListFrame {
    let data: Vec<String> = (0..total).map(|i| format!("row {i}")).collect();
    let source = SizeSource::fixed(TerminalSize::default());
    let config = ListConfig::default().with_height(HeightMode::Fixed(4));
    let mut list = VirtualList::builder(|p: RenderItemProps<'_, String>| p.item.clone())
        .config(config)
        .mount(source.subscribe(), data.len(), selected);
    list.render(&data, selected)
}

#[test]
fn indicators_are_dimmed_and_selection_reversed() {
    // 4 rows with indicators -> 2 visible items, offset 4
    let frame = frame_for(10, 5);
    let mut w = Writer::new();
    w.paint_frame(&frame, 0, 4);
    assert_eq!(
        w.commands(),
        &[
            Command::MoveTo(0, 0),
            Command::ClearLine(0),
            Command::Dim(true),
            Command::Print("  ▲ 4 more".into()),
            Command::Dim(false),
            Command::MoveTo(0, 1),
            Command::ClearLine(1),
            Command::Print("row 4".into()),
            Command::MoveTo(0, 2),
            Command::ClearLine(2),
            Command::Reverse(true),
            Command::Print("row 5".into()),
            Command::Reverse(false),
            Command::MoveTo(0, 3),
            Command::ClearLine(3),
            Command::Dim(true),
            Command::Print("  ▼ 4 more".into()),
            Command::Dim(false),
        ]
    );
}

#[test]
fn rows_past_the_frame_are_cleared() {
    let frame = frame_for(1, 0);
    let mut w = Writer::new();
    w.paint_frame(&frame, 2, 3);
    let clears: Vec<_> = w
        .commands()
        .iter()
        .filter(|c| matches!(c, Command::ClearLine(_)))
        .cloned()
        .collect();
    assert_eq!(
        clears,
        vec![
            Command::ClearLine(2),
            Command::ClearLine(3),
            Command::ClearLine(4)
        ]
    );
}

#[test]
fn region_limits_painted_rows() {
    let frame = frame_for(10, 0);
    let mut w = Writer::new();
    w.paint_frame(&frame, 0, 1);
    let prints = w
        .commands()
        .iter()
        .filter(|c| matches!(c, Command::Print(_)))
        .count();
    assert_eq!(prints, 1);
}

#[test]
fn flush_emits_text_to_sink() {
    let frame = frame_for(3, 0);
    let mut w = Writer::new();
    w.paint_frame(&frame, 0, 4);
    let mut out: Vec<u8> = Vec::new();
    w.flush_to(&mut out).unwrap();
    let text = String::from_utf8_lossy(&out);
    assert!(text.contains("row 0"));
    assert!(text.contains("row 1"));
    assert!(!text.contains("row 2"));
    assert!(text.contains("▼ 1 more"));
}
