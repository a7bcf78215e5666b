use std::{
    env,
    fs::{read_to_string, File},
    io::{BufWriter, Write},
    path::Path,
};

use phf_codegen::Map;

/// Codegener for the recognized vocabularies.
/// Every line of the input file is `raw_value Variant`, which becomes an entry
/// of a static map from the raw save file value to `enum_name::Variant`.
fn create_vocabulary_file(
    vocabulary_filename: &'static str,
    output_filename: &'static str,
    variable_name: &'static str,
    enum_name: &'static str,
) {
    println!("cargo:rerun-if-changed={}", vocabulary_filename);
    let path = Path::new(&env::var("OUT_DIR").unwrap()).join(output_filename);
    let mut file = BufWriter::new(File::create(&path).unwrap());

    let contents = read_to_string(vocabulary_filename).unwrap();
    let mut map = Map::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut parts = line.split_whitespace();
        let value = parts.next().unwrap();
        let variant = parts.next().unwrap();
        map.entry(value, format!("{}::{}", enum_name, variant));
    }
    write!(
        &mut file,
        "static {}: phf::Map<&'static str, {}> = {}",
        variable_name,
        enum_name,
        map.build()
    )
    .unwrap();
    write!(&mut file, ";\n").unwrap();
}

fn main() {
    create_vocabulary_file(
        "data/star_classes.txt",
        "star_classes.rs",
        "STAR_CLASSES",
        "StarCategory",
    );
    create_vocabulary_file(
        "data/object_types.txt",
        "object_types.rs",
        "OBJECT_TYPES",
        "ObjectKind",
    );
    create_vocabulary_file(
        "data/system_flags.txt",
        "system_flags.rs",
        "SYSTEM_FLAGS",
        "SystemFlag",
    );
    create_vocabulary_file(
        "data/bypass_types.txt",
        "bypass_types.rs",
        "BYPASS_TYPES",
        "BypassKind",
    );
}
