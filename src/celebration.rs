use rand::seq::SliceRandom;
use rand::Rng;

const SYMBOLS: [char; 6] = ['*', '•', '✦', '✶', '✧', '❋'];
const GRAVITY: f64 = 15.0;
const DT: f64 = 0.1; // fixed animation timestep, one tick

/// Shape of a confetti burst: how many particles, how wide the fan, and how
/// far down the screen it originates (fraction of terminal height).
#[derive(Debug, Clone, Copy)]
pub struct Burst {
    pub particle_count: usize,
    pub spread_degrees: f64,
    pub origin_y: f64,
}

impl Burst {
    /// Small burst fired on every correct answer.
    pub const CORRECT: Burst = Burst {
        particle_count: 100,
        spread_degrees: 70.0,
        origin_y: 0.6,
    };

    /// Big burst fired on the perfect-score celebration.
    pub const PERFECT: Burst = Burst {
        particle_count: 200,
        spread_degrees: 100.0,
        origin_y: 0.6,
    };
}

#[derive(Debug, Clone)]
pub struct ConfettiParticle {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
}

impl ConfettiParticle {
    fn spawn(origin_x: f64, origin_y: f64, spread_degrees: f64) -> Self {
        let mut rng = rand::thread_rng();

        // Fan out around straight up, like party-popper confetti.
        let half = spread_degrees / 2.0;
        let angle = rng.gen_range(-half..=half).to_radians();
        let speed = rng.gen_range(4.0..10.0);

        Self {
            x: origin_x,
            y: origin_y,
            vel_x: angle.sin() * speed,
            vel_y: -angle.cos() * speed,
            symbol: *SYMBOLS.choose(&mut rng).unwrap_or(&'*'),
            color_index: rng.gen_range(0..7),
            age: 0.0,
            max_age: rng.gen_range(1.5..3.0),
        }
    }

    /// One physics step; returns false once the particle has aged out.
    fn update(&mut self) -> bool {
        self.x += self.vel_x * DT;
        self.y += self.vel_y * DT;
        self.vel_y += GRAVITY * DT;
        self.age += DT;
        self.age < self.max_age
    }

    /// Fade factor in [0,1], 1 when fresh.
    pub fn brightness(&self) -> f64 {
        1.0 - (self.age / self.max_age)
    }
}

/// All live confetti on screen. Bursts accumulate; the field is inactive once
/// every particle has aged out or fallen off screen.
#[derive(Debug, Default)]
pub struct ConfettiField {
    pub particles: Vec<ConfettiParticle>,
    terminal_width: f64,
    terminal_height: f64,
}

impl ConfettiField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        !self.particles.is_empty()
    }

    pub fn burst(&mut self, burst: &Burst, width: u16, height: u16) {
        self.terminal_width = width as f64;
        self.terminal_height = height as f64;

        let origin_x = self.terminal_width / 2.0;
        let origin_y = self.terminal_height * burst.origin_y;

        for _ in 0..burst.particle_count {
            self.particles
                .push(ConfettiParticle::spawn(origin_x, origin_y, burst.spread_degrees));
        }
    }

    pub fn update(&mut self) {
        let width = self.terminal_width;
        let height = self.terminal_height;
        // A little margin so particles leave the screen smoothly.
        let buffer = 5.0;

        self.particles.retain_mut(|particle| {
            particle.update()
                && particle.y < height + buffer
                && particle.x > -buffer
                && particle.x < width + buffer
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_starts_empty_and_inactive() {
        let field = ConfettiField::new();
        assert!(!field.is_active());
        assert!(field.particles.is_empty());
    }

    #[test]
    fn burst_spawns_the_requested_particle_count() {
        let mut field = ConfettiField::new();

        field.burst(&Burst::CORRECT, 80, 24);
        assert_eq!(field.particles.len(), Burst::CORRECT.particle_count);

        field.burst(&Burst::PERFECT, 80, 24);
        assert_eq!(
            field.particles.len(),
            Burst::CORRECT.particle_count + Burst::PERFECT.particle_count
        );
    }

    #[test]
    fn particles_launch_upward_from_the_origin_height() {
        let mut field = ConfettiField::new();
        field.burst(&Burst::CORRECT, 80, 24);

        for particle in &field.particles {
            assert!(particle.vel_y < 0.0, "initial velocity should point up");
            assert!((particle.y - 24.0 * 0.6).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn gravity_pulls_particles_back_down() {
        let mut field = ConfettiField::new();
        field.burst(&Burst::CORRECT, 80, 24);

        let initial_vel_y = field.particles[0].vel_y;
        field.update();
        assert!(field.particles[0].vel_y > initial_vel_y);
    }

    #[test]
    fn particles_age_out_after_enough_updates() {
        let mut field = ConfettiField::new();
        field.burst(&Burst::PERFECT, 80, 24);
        assert!(field.is_active());

        // max_age tops out at 3.0 seconds; 40 steps of 0.1s clears everything.
        for _ in 0..40 {
            field.update();
        }
        assert!(!field.is_active());
    }

    #[test]
    fn off_screen_particles_are_culled() {
        let mut field = ConfettiField::new();
        field.burst(&Burst::CORRECT, 20, 10);

        let mut runaway = field.particles[0].clone();
        runaway.x = 100.0;
        runaway.y = 100.0;
        field.particles.push(runaway);

        field.update();

        for particle in &field.particles {
            assert!(particle.x < 25.0 && particle.y < 15.0);
        }
    }

    #[test]
    fn brightness_fades_with_age() {
        let mut field = ConfettiField::new();
        field.burst(&Burst::CORRECT, 80, 24);

        let fresh = field.particles[0].brightness();
        for _ in 0..5 {
            field.update();
        }
        if let Some(particle) = field.particles.first() {
            assert!(particle.brightness() < fresh);
        }
    }
}
