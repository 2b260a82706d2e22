use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{json, Value};

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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
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

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

struct Sale {
    city: &'static str,
    product: &'static str,
    month: u32,
    units: u32,
    price: f64,
    /// Blank for roughly one row in ten.
    rating: Option<f64>,
}

/// City names carry accents so each encoding actually matters.
const CITIES: [&str; 5] = ["Zürich", "Málaga", "Göteborg", "Besançon", "Kraków"];
const PRODUCTS: [&str; 4] = ["Crème", "Café", "Thé", "Jus"];

fn generate_sales(rng: &mut SimpleRng, n: usize) -> Vec<Sale> {
    (0..n)
        .map(|i| Sale {
            city: rng.pick(&CITIES),
            product: rng.pick(&PRODUCTS),
            month: (i % 12) as u32 + 1,
            units: rng.range(1.0, 250.0) as u32,
            price: (rng.range(0.5, 40.0) * 100.0).round() / 100.0,
            rating: (rng.next_f64() > 0.1).then(|| (rng.range(1.0, 5.0) * 10.0).round() / 10.0),
        })
        .collect()
}

fn to_csv(sales: &[Sale]) -> String {
    let mut out = String::from("city,product,month,units,price,rating\n");
    for s in sales {
        let rating = s.rating.map(|r| r.to_string()).unwrap_or_default();
        out.push_str(&format!(
            "{},{},{},{},{},{rating}\n",
            s.city, s.product, s.month, s.units, s.price
        ));
    }
    out
}

fn sale_to_json(s: &Sale) -> Value {
    json!({
        "city": s.city,
        "product": s.product,
        "month": s.month,
        "sales": { "units": s.units, "price": s.price },
        "rating": s.rating,
    })
}

fn latin1(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).context("character outside Latin-1"))
        .collect()
}

fn utf16le_with_bom(text: &str) -> Vec<u8> {
    let mut out = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}

fn write(dir: &Path, name: &str, bytes: &[u8]) -> Result<()> {
    let path = dir.join(name);
    fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
    println!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let sales = generate_sales(&mut rng, 120);
    let dir = Path::new("samples");
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let csv = to_csv(&sales);
    write(dir, "sales_utf8.csv", csv.as_bytes())?;
    write(dir, "sales_latin1.csv", &latin1(&csv)?)?;
    let (cp1252, _, _) = encoding_rs::WINDOWS_1252.encode(&csv);
    write(dir, "sales_cp1252.csv", &cp1252)?;
    write(dir, "sales_utf16.csv", &utf16le_with_bom(&csv))?;

    let records: Vec<Value> = sales.iter().map(sale_to_json).collect();
    let list = serde_json::to_vec_pretty(&records).context("encoding JSON list")?;
    write(dir, "sales_list.json", &list)?;

    let wrapped = json!({ "source": "generate_sample", "records": records });
    let nested = serde_json::to_vec_pretty(&wrapped).context("encoding nested JSON")?;
    write(dir, "sales_nested.json", &nested)?;

    Ok(())
}
