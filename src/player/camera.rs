// ============================================
// Camera - Свободная камера от первого лица
// ============================================
// WASD - движение по направлению взгляда
// Space / Shift - вверх / вниз вдоль world_up
// Мышь - yaw / pitch, колесо - zoom (угол обзора)
//
// Углы хранятся в градусах.

use crate::math::{Matrix4, Vector3};

pub const DEFAULT_YAW: f32 = -90.0;
pub const DEFAULT_PITCH: f32 = 0.0;
pub const DEFAULT_SPEED: f32 = 20.0;
pub const DEFAULT_SENSITIVITY: f32 = 0.1;
pub const DEFAULT_ZOOM: f32 = 45.0;

/// Ограничение pitch (не даём перевернуться)
pub const PITCH_LIMIT: f32 = 89.0;
pub const ZOOM_MIN: f32 = 1.0;
pub const ZOOM_MAX: f32 = 45.0;

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;

/// Ввод за один кадр. Собирается вызывающим кодом из событий окна.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,

    /// Смещение мыши в пикселях (dy > 0 — мышь вниз)
    pub mouse_dx: f32,
    pub mouse_dy: f32,

    /// Прокрутка колеса (> 0 — приблизить)
    pub scroll: f32,
}

impl InputSnapshot {
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Камера с углами Эйлера
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vector3,
    pub yaw: f32,
    pub pitch: f32,
    pub world_up: Vector3,

    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    /// Вертикальный угол обзора
    pub zoom: f32,

    // Вычисляются из yaw/pitch
    front: Vector3,
    right: Vector3,
    up: Vector3,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vector3::ZERO, Vector3::UNIT_Y)
    }
}

impl Camera {
    pub fn new(position: Vector3, world_up: Vector3) -> Self {
        let mut camera = Self {
            position,
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            world_up: world_up.normalized(),
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            zoom: DEFAULT_ZOOM,
            front: Vector3::new(0.0, 0.0, -1.0),
            right: Vector3::UNIT_X,
            up: Vector3::UNIT_Y,
        };
        camera.update_vectors();
        camera
    }

    /// Направление взгляда
    pub fn front(&self) -> Vector3 {
        self.front
    }

    pub fn right(&self) -> Vector3 {
        self.right
    }

    pub fn up(&self) -> Vector3 {
        self.up
    }

    /// Повернуть камеру на точку. Pitch ограничивается как при вводе мышью.
    pub fn look_at_point(&mut self, target: Vector3) {
        let dir = (target - self.position).normalized();
        if dir == Vector3::ZERO {
            return;
        }
        self.yaw = dir.z.atan2(dir.x).to_degrees();
        self.pitch = dir.y.clamp(-1.0, 1.0).asin().to_degrees().clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    /// Применить ввод за кадр длительностью `dt` секунд
    pub fn update(&mut self, dt: f32, input: &InputSnapshot) {
        self.process_mouse(input.mouse_dx, input.mouse_dy);
        self.process_scroll(input.scroll);

        let velocity = self.movement_speed * dt;
        let mut offset = Vector3::ZERO;

        if input.forward {
            offset += self.front;
        }
        if input.backward {
            offset -= self.front;
        }
        if input.right {
            offset += self.right;
        }
        if input.left {
            offset -= self.right;
        }
        if input.up {
            offset += self.world_up;
        }
        if input.down {
            offset -= self.world_up;
        }

        self.position += offset * velocity;
    }

    fn process_mouse(&mut self, dx: f32, dy: f32) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        self.yaw += dx * self.mouse_sensitivity;
        self.pitch -= dy * self.mouse_sensitivity;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    fn process_scroll(&mut self, scroll: f32) {
        self.zoom = (self.zoom - scroll).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vector3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalized();
        self.right = self.front.cross(self.world_up).normalized();
        self.up = self.right.cross(self.front).normalized();
    }

    /// Матрица вида (View Matrix)
    pub fn view_matrix(&self) -> Matrix4 {
        Matrix4::look_at(self.position, self.position + self.front, self.up)
    }

    /// Матрица проекции (OpenGL clip space, z в -1..1)
    pub fn projection_matrix(&self, aspect: f32) -> Matrix4 {
        Matrix4::perspective(self.zoom.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
    }

    /// Комбинированная матрица View-Projection
    pub fn view_projection_matrix(&self, aspect: f32) -> Matrix4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}
