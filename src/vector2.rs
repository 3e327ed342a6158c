use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, right_hand_side: Self) -> Self::Output {
        Self::new(self.x + right_hand_side.x, self.y + right_hand_side.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, right_hand_side: Self) -> Self::Output {
        Self::new(self.x - right_hand_side.x, self.y - right_hand_side.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;

    fn mul(self, scalar_value: f32) -> Self::Output {
        Self::new(self.x * scalar_value, self.y * scalar_value)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, right_hand_side: Self) {
        self.x += right_hand_side.x;
        self.y += right_hand_side.y;
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, right_hand_side: Self) {
        self.x -= right_hand_side.x;
        self.y -= right_hand_side.y;
    }
}
