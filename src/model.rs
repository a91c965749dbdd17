//! Gallery state machine: main-strip and modal slide indices, swipe
//! resolution, and the RTL direction mapping. The reducer is the only
//! mutation path; everything in here is DOM-free and host-testable.

use std::rc::Rc;
use yew::Reducible;

/// Identity of a mounted gallery, allocated by the widget registry. The
/// active-modal registry compares owners by this id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GalleryId(pub usize);

/// Minimum horizontal displacement (px) for a completed swipe to
/// navigate; anything shorter resolves to a non-swipe.
pub const SWIPE_NAV_PX: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavDirection {
    Prev,
    Next,
}

impl NavDirection {
    /// Resolve a finished swipe. `displacement` is start minus end, so a
    /// finger moving left yields a positive value; in LTR that means
    /// "next", RTL inverts the mapping.
    pub fn from_swipe(displacement: f64, rtl: bool) -> Option<Self> {
        if displacement.abs() < SWIPE_NAV_PX {
            return None;
        }
        let next = if rtl { displacement < 0.0 } else { displacement > 0.0 };
        Some(if next { NavDirection::Next } else { NavDirection::Prev })
    }
}

/// Arrow key delivered through the modal keyboard router. Raw: the
/// owning gallery applies its own RTL mapping, the router does not.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrowKey {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GalleryState {
    pub current: usize,
    pub len: usize,
    pub modal_index: usize,
    pub modal_len: usize,
    pub modal_open: bool,
    pub rtl: bool,
}

impl GalleryState {
    pub fn new(len: usize, rtl: bool) -> Self {
        Self {
            current: 0,
            len,
            modal_index: 0,
            modal_len: len,
            modal_open: false,
            rtl,
        }
    }

    fn step(index: usize, len: usize, dir: NavDirection) -> usize {
        match dir {
            NavDirection::Next => (index + 1) % len,
            NavDirection::Prev => (index + len - 1) % len,
        }
    }
}

#[derive(Clone, Debug)]
pub enum GalleryAction {
    /// Jump the main strip to an absolute index; out of bounds is a
    /// no-op.
    GoTo(usize),
    /// Resolved main-strip swipe, reported as start minus end x. Wraps.
    SwipeMain { displacement: f64 },
    /// Open the zoom modal synchronized to the given slide.
    OpenModal(usize),
    CloseModal,
    /// Modal prev/next controls. Not RTL-mirrored: the buttons are
    /// visually placed, only keys and swipes mirror.
    ModalNav(NavDirection),
    /// Resolved modal swipe.
    SwipeModal { displacement: f64 },
    /// Arrow key routed here while this gallery owns the modal.
    ModalArrow(ArrowKey),
}

impl Reducible for GalleryState {
    type Action = GalleryAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use GalleryAction::*;
        let mut new = (*self).clone();
        match action {
            GoTo(index) => {
                if index >= new.len {
                    return self;
                }
                new.current = index;
            }
            SwipeMain { displacement } => {
                if new.len == 0 {
                    return self;
                }
                let Some(dir) = NavDirection::from_swipe(displacement, new.rtl) else {
                    return self;
                };
                new.current = Self::step(new.current, new.len, dir);
            }
            OpenModal(index) => {
                new.modal_open = true;
                if index < new.modal_len {
                    new.modal_index = index;
                }
            }
            CloseModal => {
                new.modal_open = false;
            }
            ModalNav(dir) => {
                if new.modal_len == 0 {
                    return self;
                }
                new.modal_index = Self::step(new.modal_index, new.modal_len, dir);
            }
            SwipeModal { displacement } => {
                if new.modal_len == 0 {
                    return self;
                }
                let Some(dir) = NavDirection::from_swipe(displacement, new.rtl) else {
                    return self;
                };
                new.modal_index = Self::step(new.modal_index, new.modal_len, dir);
            }
            ModalArrow(key) => {
                if new.modal_len == 0 {
                    return self;
                }
                let dir = match key {
                    ArrowKey::Left => {
                        if new.rtl { NavDirection::Next } else { NavDirection::Prev }
                    }
                    ArrowKey::Right => {
                        if new.rtl { NavDirection::Prev } else { NavDirection::Next }
                    }
                };
                new.modal_index = Self::step(new.modal_index, new.modal_len, dir);
            }
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce(state: GalleryState, action: GalleryAction) -> GalleryState {
        (*Rc::new(state).reduce(action)).clone()
    }

    #[test]
    fn go_to_in_bounds_moves_current() {
        let s = reduce(GalleryState::new(3, false), GalleryAction::GoTo(2));
        assert_eq!(s.current, 2);
    }

    #[test]
    fn go_to_out_of_bounds_is_ignored() {
        let s = reduce(GalleryState::new(3, false), GalleryAction::GoTo(3));
        assert_eq!(s.current, 0);
        let s = reduce(GalleryState::new(0, false), GalleryAction::GoTo(0));
        assert_eq!(s.current, 0);
    }

    #[test]
    fn short_swipe_never_navigates() {
        for d in [49.0, -49.0, 0.0] {
            let s = reduce(
                GalleryState::new(3, false),
                GalleryAction::SwipeMain { displacement: d },
            );
            assert_eq!(s.current, 0, "displacement {d} must not navigate");
        }
    }

    #[test]
    fn ltr_swipe_direction_table() {
        // Finger moved left (positive displacement) advances.
        let s = reduce(
            GalleryState::new(3, false),
            GalleryAction::SwipeMain { displacement: 60.0 },
        );
        assert_eq!(s.current, 1);
        // Finger moved right goes back, wrapping.
        let s = reduce(
            GalleryState::new(3, false),
            GalleryAction::SwipeMain { displacement: -60.0 },
        );
        assert_eq!(s.current, 2);
    }

    #[test]
    fn rtl_swipe_direction_is_mirrored() {
        let s = reduce(
            GalleryState::new(3, true),
            GalleryAction::SwipeMain { displacement: 60.0 },
        );
        assert_eq!(s.current, 2);
        let s = reduce(
            GalleryState::new(3, true),
            GalleryAction::SwipeMain { displacement: -60.0 },
        );
        assert_eq!(s.current, 1);
    }

    #[test]
    fn main_strip_swipe_wraps_forward() {
        // 3 slides, LTR: touchstart at x=200, touchend at x=140.
        let mut start = GalleryState::new(3, false);
        start.current = 2;
        let s = reduce(
            start,
            GalleryAction::SwipeMain { displacement: 200.0 - 140.0 },
        );
        assert_eq!(s.current, 0);
    }

    #[test]
    fn modal_navigation_is_circular() {
        let mut start = GalleryState::new(3, false);
        start.modal_index = 2;
        let s = reduce(start, GalleryAction::ModalNav(NavDirection::Next));
        assert_eq!(s.modal_index, 0);

        let s = reduce(
            GalleryState::new(3, false),
            GalleryAction::ModalNav(NavDirection::Prev),
        );
        assert_eq!(s.modal_index, 2);
    }

    #[test]
    fn modal_lifecycle_leaves_main_strip_alone() {
        let mut s = GalleryState::new(4, false);
        s.current = 1;
        let s = reduce(s, GalleryAction::OpenModal(2));
        assert!(s.modal_open);
        assert_eq!(s.modal_index, 2);
        assert_eq!(s.current, 1);

        let s = reduce(s, GalleryAction::ModalNav(NavDirection::Next));
        assert_eq!(s.modal_index, 3);
        assert_eq!(s.current, 1);

        let s = reduce(s, GalleryAction::CloseModal);
        assert!(!s.modal_open);
        assert_eq!(s.current, 1);
    }

    #[test]
    fn open_modal_with_bad_index_keeps_previous_slide() {
        let mut start = GalleryState::new(3, false);
        start.modal_index = 1;
        let s = reduce(start, GalleryAction::OpenModal(9));
        assert!(s.modal_open);
        assert_eq!(s.modal_index, 1);
    }

    #[test]
    fn modal_arrows_mirror_under_rtl() {
        // LTR: ArrowLeft goes back.
        let s = reduce(
            GalleryState::new(3, false),
            GalleryAction::ModalArrow(ArrowKey::Left),
        );
        assert_eq!(s.modal_index, 2);
        // RTL: ArrowLeft advances.
        let s = reduce(
            GalleryState::new(3, true),
            GalleryAction::ModalArrow(ArrowKey::Left),
        );
        assert_eq!(s.modal_index, 1);
        // RTL: ArrowRight goes back.
        let s = reduce(
            GalleryState::new(3, true),
            GalleryAction::ModalArrow(ArrowKey::Right),
        );
        assert_eq!(s.modal_index, 2);
    }

    #[test]
    fn modal_swipe_follows_the_same_thresholds() {
        let s = reduce(
            GalleryState::new(3, false),
            GalleryAction::SwipeModal { displacement: 45.0 },
        );
        assert_eq!(s.modal_index, 0);
        let s = reduce(
            GalleryState::new(3, false),
            GalleryAction::SwipeModal { displacement: 60.0 },
        );
        assert_eq!(s.modal_index, 1);
    }
}
