use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Booster generations in flight order: (category, flights, mean payload kg,
/// payload spread, success probability).
const BOOSTERS: [(&str, usize, f64, f64, f64); 5] = [
    ("v1.0", 5, 300.0, 250.0, 0.2),
    ("v1.1", 15, 2500.0, 1200.0, 0.35),
    ("FT", 24, 4500.0, 2000.0, 0.75),
    ("B4", 11, 6000.0, 2500.0, 0.55),
    ("B5", 1, 3600.0, 500.0, 1.0),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

fn main() {
    let mut rng = SimpleRng::new(42);

    let mut all_flight: Vec<i64> = Vec::new();
    let mut all_site: Vec<&str> = Vec::new();
    let mut all_class: Vec<i64> = Vec::new();
    let mut all_payload: Vec<f64> = Vec::new();
    let mut all_category: Vec<&str> = Vec::new();

    let mut flight: i64 = 1;
    for (category, flights, mean, spread, p_success) in BOOSTERS {
        for _ in 0..flights {
            let payload = rng.gauss(mean, spread).clamp(0.0, 9600.0).round();
            let class = i64::from(rng.next_f64() < p_success);

            all_flight.push(flight);
            all_site.push(rng.pick(&SITES));
            all_class.push(class);
            all_payload.push(payload);
            all_category.push(category);
            flight += 1;
        }
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(all_flight.clone())),
            Arc::new(StringArray::from(all_site.clone())),
            Arc::new(Int64Array::from(all_class.clone())),
            Arc::new(Float64Array::from(all_payload.clone())),
            Arc::new(StringArray::from(all_category.clone())),
        ],
    )
    .expect("Failed to create RecordBatch");

    // Write Parquet
    let parquet_path = "sample_launches.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    // Write CSV with the same columns
    let csv_path = "sample_launches.csv";
    let mut csv_writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    csv_writer
        .write_record([
            "Flight Number",
            "Launch Site",
            "class",
            "Payload Mass (kg)",
            "Booster Version Category",
        ])
        .expect("Failed to write CSV header");
    for i in 0..all_flight.len() {
        csv_writer
            .write_record([
                all_flight[i].to_string(),
                all_site[i].to_string(),
                all_class[i].to_string(),
                all_payload[i].to_string(),
                all_category[i].to_string(),
            ])
            .expect("Failed to write CSV row");
    }
    csv_writer.flush().expect("Failed to flush CSV");

    println!(
        "Wrote {} launches to {parquet_path} and {csv_path}",
        all_flight.len()
    );
}
