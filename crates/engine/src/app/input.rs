use crate::sim::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Dash,
    Skill,
    Quit,
}

const ACTION_COUNT: usize = 7;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
            InputAction::Dash => 4,
            InputAction::Skill => 5,
            InputAction::Quit => 6,
        }
    }
}

/// Read-only view of the controls for one tick. Entities consume it and
/// never write to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    actions: ActionStates,
    mouse_held: bool,
    cursor_position_px: Option<Vec2>,
    window_width: u32,
    window_height: u32,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(
        actions: ActionStates,
        mouse_held: bool,
        cursor_position_px: Option<Vec2>,
        window_width: u32,
        window_height: u32,
    ) -> Self {
        Self {
            actions,
            mouse_held,
            cursor_position_px,
            window_width,
            window_height,
        }
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    pub fn mouse_held(&self) -> bool {
        self.mouse_held
    }

    pub fn cursor_position_px(&self) -> Option<Vec2> {
        self.cursor_position_px
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    /// Cursor offset from the viewport center. The camera keeps the player's
    /// center on the viewport center, so this is also the cursor's offset
    /// from the player's center in world units. No cursor reads as zero.
    pub fn mouse_camera_relative(&self) -> Vec2 {
        let Some(cursor) = self.cursor_position_px else {
            return Vec2::ZERO;
        };
        Vec2 {
            x: cursor.x - self.window_width as f32 * 0.5,
            y: cursor.y - self.window_height as f32 * 0.5,
        }
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn with_mouse_held(mut self, mouse_held: bool) -> Self {
        self.mouse_held = mouse_held;
        self
    }

    pub fn with_cursor_position_px(mut self, cursor_position_px: Option<Vec2>) -> Self {
        self.cursor_position_px = cursor_position_px;
        self
    }

    pub fn with_window_size(mut self, window_size: (u32, u32)) -> Self {
        self.window_width = window_size.0;
        self.window_height = window_size.1;
        self
    }
}
