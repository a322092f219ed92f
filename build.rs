use std::collections::BTreeMap;
use std::io::{self, BufRead};
use std::{env, fs, path::Path};

// The build script bakes the dictionary and server-table files under
// data/ directly into the final binary, so no runtime file loading or
// parsing cost is ever paid.
//
// The generated arrays are sorted, which the library relies on for
// binary searches over TLDs and WHOIS servers.
fn main() {
    println!("cargo:rerun-if-changed=data/tlds.txt");
    println!("cargo:rerun-if-changed=data/keywords.txt");
    println!("cargo:rerun-if-changed=data/whois_servers.json");

    let mut output = String::new();

    output.push_str(&string_array("TLDS", "./data/tlds.txt"));
    output.push('\n');
    output.push_str(&string_array("KEYWORDS", "./data/keywords.txt"));
    output.push('\n');
    output.push_str(&whois_server_table("./data/whois_servers.json"));

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("data.rs");
    fs::write(&dest_path, output).unwrap();
}

fn string_array(name: &str, path: &str) -> String {
    let lines = match read_lines(path) {
        Ok(lines) => lines,
        Err(e) => panic!("unable to build library due to missing dictionary file(s): {e}"),
    };

    let mut entries = lines
        .map(|l| l.unwrap().trim().to_lowercase())
        .filter(|l| !l.is_empty())
        .collect::<Vec<String>>();

    entries.sort();
    entries.dedup();

    let mut array = format!("pub static {}: [&str; {}] = [\r\n", name, entries.len());
    for entry in &entries {
        array.push_str(&format!("    \"{entry}\",\r\n"));
    }
    array.push_str("];\r\n");
    array
}

fn whois_server_table(path: &str) -> String {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => panic!("unable to build library due to missing WHOIS server table: {e}"),
    };

    let servers: BTreeMap<String, String> =
        serde_json::from_str(&raw).expect("data/whois_servers.json is not a TLD -> host object");

    let mut table = format!(
        "pub static WHOIS_SERVERS: [(&str, &str); {}] = [\r\n",
        servers.len()
    );

    // BTreeMap iteration is already sorted by TLD.
    for (tld, host) in &servers {
        table.push_str(&format!("    (\"{tld}\", \"{host}\"),\r\n"));
    }
    table.push_str("];\r\n");
    table
}

fn read_lines<P>(filename: P) -> io::Result<io::Lines<io::BufReader<fs::File>>>
where
    P: AsRef<Path>,
{
    let file = fs::File::open(filename)?;
    Ok(io::BufReader::new(file).lines())
}
