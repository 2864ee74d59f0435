use anyhow::{Context, Result};
use serde::Serialize;

/// One row of the sample file.
#[derive(Debug, Serialize)]
struct TeacherRow<'a> {
    name: String,
    email: String,
    subject: &'a str,
    class: String,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "teachers.csv".to_string());

    let mut rng = SimpleRng::new(42);

    let first_names = ["Ada", "Grace", "Alan", "Edsger", "Barbara", "Donald", "Margaret"];
    let last_names = ["Lovelace", "Hopper", "Turing", "Dijkstra", "Liskov", "Knuth", "Hamilton"];
    let subjects = ["Math", "Physics", "Chemistry", "Biology", "History", "English"];
    let grades = ["5", "6", "7", "8", "9", "10"];
    let sections = ["a", "b", "c"];

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let rows = 20;
    for _ in 0..rows {
        let first = rng.pick(&first_names);
        let last = rng.pick(&last_names);
        let row = TeacherRow {
            name: format!("{first} {last}"),
            email: format!(
                "{}.{}@school.example",
                first.to_ascii_lowercase(),
                last.to_ascii_lowercase()
            ),
            subject: *rng.pick(&subjects),
            class: format!("{}{}", rng.pick(&grades), rng.pick(&sections)),
        };
        writer.serialize(&row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV output")?;

    println!("Wrote {rows} teacher rows to {output_path}");
    Ok(())
}
