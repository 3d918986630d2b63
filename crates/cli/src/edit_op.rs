use std::str::FromStr;

use subedit_core::editing::domain::boundary_controller::{NudgeDirection, PointerId};
use subedit_core::segments::domain::boundary::Boundary;
use subedit_core::segments::domain::edit_rejected::EditRejected;
use subedit_core::session::editor_session::EditorSession;
use subedit_core::shared::timecode::parse_timecode;

const SCRIPT_POINTER: PointerId = 1;

/// One scripted edit, parsed from a `--op` argument.
///
/// Forms:
/// - `drag:IDX:start|end:TIME`
/// - `time:IDX:start|end:HH:MM:SS,mmm` (typed time, also plain seconds)
/// - `nudge:IDX:start|end:STEPS[:fine]` (negative steps move earlier)
/// - `split:IDX:TIME`
/// - `delete:IDX`
/// - `text:IDX:TEXT`
/// - `undo`
#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    Drag {
        index: usize,
        boundary: Boundary,
        time: f64,
    },
    Retime {
        index: usize,
        boundary: Boundary,
        time: f64,
    },
    Nudge {
        index: usize,
        boundary: Boundary,
        steps: i32,
        fine: bool,
    },
    Split {
        index: usize,
        at: f64,
    },
    Delete {
        index: usize,
    },
    Text {
        index: usize,
        text: String,
    },
    Undo,
}

impl FromStr for EditOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, rest) = s.split_once(':').unwrap_or((s, ""));
        match kind {
            "undo" if rest.is_empty() => Ok(EditOp::Undo),
            "delete" => Ok(EditOp::Delete {
                index: parse_index(rest)?,
            }),
            "split" => {
                let (index, at) = rest.split_once(':').ok_or(usage(s))?;
                Ok(EditOp::Split {
                    index: parse_index(index)?,
                    at: parse_time(at)?,
                })
            }
            "text" => {
                let (index, text) = rest.split_once(':').ok_or(usage(s))?;
                Ok(EditOp::Text {
                    index: parse_index(index)?,
                    text: text.replace("\\n", "\n"),
                })
            }
            "drag" => {
                let parts: Vec<&str> = rest.split(':').collect();
                let [index, boundary, time] = parts[..] else {
                    return Err(usage(s));
                };
                Ok(EditOp::Drag {
                    index: parse_index(index)?,
                    boundary: boundary.parse()?,
                    time: parse_time(time)?,
                })
            }
            "time" => {
                let mut parts = rest.splitn(3, ':');
                let (Some(index), Some(boundary), Some(time)) =
                    (parts.next(), parts.next(), parts.next())
                else {
                    return Err(usage(s));
                };
                Ok(EditOp::Retime {
                    index: parse_index(index)?,
                    boundary: boundary.parse()?,
                    time: parse_typed_time(time)?,
                })
            }
            "nudge" => {
                let parts: Vec<&str> = rest.split(':').collect();
                let (index, boundary, steps, fine) = match parts[..] {
                    [i, b, n] => (i, b, n, false),
                    [i, b, n, "fine"] => (i, b, n, true),
                    _ => return Err(usage(s)),
                };
                Ok(EditOp::Nudge {
                    index: parse_index(index)?,
                    boundary: boundary.parse()?,
                    steps: steps
                        .trim_start_matches('+')
                        .parse()
                        .map_err(|_| format!("Invalid step count '{steps}'"))?,
                    fine,
                })
            }
            _ => Err(usage(s)),
        }
    }
}

impl EditOp {
    /// Replay the edit through the same entry points interactive input uses.
    pub fn apply(&self, session: &mut EditorSession) -> Result<(), EditRejected> {
        match self {
            EditOp::Drag {
                index,
                boundary,
                time,
            } => {
                session.pointer_down(SCRIPT_POINTER, *index, *boundary)?;
                let geometry = session.track_geometry();
                let x = geometry.x_at(*time, session.store().duration());
                session.pointer_move(SCRIPT_POINTER, x);
                session.pointer_up(SCRIPT_POINTER);
                Ok(())
            }
            EditOp::Retime {
                index,
                boundary,
                time,
            } => session
                .set_boundary_time(*index, *boundary, *time)
                .map(|_| ()),
            EditOp::Nudge {
                index,
                boundary,
                steps,
                fine,
            } => {
                session.select_boundary(*index, *boundary)?;
                let direction = if *steps < 0 {
                    NudgeDirection::Earlier
                } else {
                    NudgeDirection::Later
                };
                for _ in 0..steps.unsigned_abs() {
                    session.nudge(direction, *fine)?;
                }
                Ok(())
            }
            EditOp::Split { index, at } => session.split(*index, *at).map(|_| ()),
            EditOp::Delete { index } => session.delete(*index).map(|_| ()),
            EditOp::Text { index, text } => {
                session.edit_text(*index, text)?;
                session.finish_text_edit();
                Ok(())
            }
            EditOp::Undo => session.undo(),
        }
    }
}

fn usage(op: &str) -> String {
    format!(
        "Invalid edit '{op}'; expected drag:IDX:start|end:TIME, time:IDX:start|end:HH:MM:SS,mmm, nudge:IDX:start|end:STEPS[:fine], \
         split:IDX:TIME, delete:IDX, text:IDX:TEXT or undo"
    )
}

fn parse_index(s: &str) -> Result<usize, String> {
    s.parse().map_err(|_| format!("Invalid segment index '{s}'"))
}

fn parse_time(s: &str) -> Result<f64, String> {
    s.parse::<f64>()
        .ok()
        .filter(|t| t.is_finite())
        .ok_or_else(|| format!("Invalid time '{s}'"))
}

/// A typed boundary time: `HH:MM:SS,mmm` like the SRT timing line, or bare
/// seconds.
fn parse_typed_time(s: &str) -> Result<f64, String> {
    if s.contains(':') {
        parse_timecode(s).map_err(|e| e.to_string())
    } else {
        parse_time(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use subedit_core::segments::domain::segment::Segment;

    fn session() -> EditorSession {
        let mut s = EditorSession::default();
        s.load(
            vec![
                Segment::new(0.0, 2.0, "a"),
                Segment::new(2.0, 6.0, "b"),
                Segment::new(7.0, 9.0, "c"),
            ],
            10.0,
            None,
        );
        s
    }

    #[rstest]
    #[case::undo("undo", EditOp::Undo)]
    #[case::delete("delete:2", EditOp::Delete { index: 2 })]
    #[case::split("split:0:1.5", EditOp::Split { index: 0, at: 1.5 })]
    #[case::text_with_colons("text:1:a: b", EditOp::Text { index: 1, text: "a: b".into() })]
    #[case::text_newline("text:0:one\\ntwo", EditOp::Text { index: 0, text: "one\ntwo".into() })]
    #[case::drag("drag:1:end:6.5", EditOp::Drag { index: 1, boundary: Boundary::End, time: 6.5 })]
    #[case::retime("time:1:start:00:00:02,250", EditOp::Retime { index: 1, boundary: Boundary::Start, time: 2.25 })]
    #[case::retime_seconds("time:0:e:1.5", EditOp::Retime { index: 0, boundary: Boundary::End, time: 1.5 })]
    #[case::nudge("nudge:0:s:-3", EditOp::Nudge { index: 0, boundary: Boundary::Start, steps: -3, fine: false })]
    #[case::nudge_fine("nudge:2:end:+2:fine", EditOp::Nudge { index: 2, boundary: Boundary::End, steps: 2, fine: true })]
    fn test_parse(#[case] input: &str, #[case] expected: EditOp) {
        assert_eq!(input.parse::<EditOp>().unwrap(), expected);
    }

    #[rstest]
    #[case::unknown("merge:1")]
    #[case::undo_with_args("undo:1")]
    #[case::bad_index("delete:x")]
    #[case::bad_time("split:0:soon")]
    #[case::nan_time("split:0:NaN")]
    #[case::bad_boundary("drag:0:middle:1.0")]
    #[case::missing_time("drag:0:end")]
    #[case::bad_timecode("time:0:end:00:99:00,000")]
    #[case::retime_missing_time("time:0:end")]
    #[case::bad_flag("nudge:0:end:1:coarse")]
    fn test_parse_rejects(#[case] input: &str) {
        assert!(input.parse::<EditOp>().is_err());
    }

    #[test]
    fn test_apply_drag_moves_boundary() {
        let mut s = session();
        EditOp::Drag {
            index: 1,
            boundary: Boundary::End,
            time: 6.5,
        }
        .apply(&mut s)
        .unwrap();
        assert_relative_eq!(s.segments()[1].end, 6.5, epsilon = 1e-9);
        assert!(!s.is_dragging());
    }

    #[test]
    fn test_apply_drag_clamps() {
        let mut s = session();
        EditOp::Drag {
            index: 1,
            boundary: Boundary::Start,
            time: 1.0,
        }
        .apply(&mut s)
        .unwrap();
        assert_relative_eq!(s.segments()[1].start, 2.0);
    }

    #[test]
    fn test_apply_typed_time_skips_snapping() {
        let mut s = session();
        EditOp::Retime {
            index: 1,
            boundary: Boundary::End,
            time: 6.437,
        }
        .apply(&mut s)
        .unwrap();
        assert_relative_eq!(s.segments()[1].end, 6.437);

        EditOp::Undo.apply(&mut s).unwrap();
        assert_relative_eq!(s.segments()[1].end, 6.0);
    }

    #[test]
    fn test_apply_typed_time_clamps() {
        let mut s = session();
        EditOp::Retime {
            index: 1,
            boundary: Boundary::End,
            time: 30.0,
        }
        .apply(&mut s)
        .unwrap();
        assert_relative_eq!(s.segments()[1].end, 7.0);
    }

    #[test]
    fn test_apply_nudge_steps() {
        let mut s = session();
        EditOp::Nudge {
            index: 2,
            boundary: Boundary::Start,
            steps: -3,
            fine: false,
        }
        .apply(&mut s)
        .unwrap();
        assert_relative_eq!(s.segments()[2].start, 6.7, epsilon = 1e-9);
    }

    #[test]
    fn test_apply_text_then_undo() {
        let mut s = session();
        EditOp::Text {
            index: 0,
            text: "new".into(),
        }
        .apply(&mut s)
        .unwrap();
        EditOp::Undo.apply(&mut s).unwrap();
        assert_eq!(s.segments()[0].text, "a");
    }

    #[test]
    fn test_apply_rejection_surfaces() {
        let mut s = session();
        assert_eq!(
            EditOp::Delete { index: 9 }.apply(&mut s),
            Err(EditRejected::IndexOutOfRange { index: 9, len: 3 })
        );
    }
}
