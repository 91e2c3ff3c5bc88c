use std::io::{BufRead, BufReader, BufWriter, Write};

/// Open `input` for buffered reading. `"stdin"` selects standard
/// input, and a `.gz` suffix routes through a multi-member gzip
/// decoder.
///
/// ```
/// use std::io::BufRead;
/// let reader = pepr::reader("tests/pruning/ref.align");
/// assert_eq!(reader.lines().count(), 12);
/// ```
pub fn reader(input: &str) -> Box<dyn BufRead> {
    if input == "stdin" {
        return Box::new(BufReader::new(std::io::stdin()));
    }

    let path = std::path::Path::new(input);
    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(why) => panic!("could not open {}: {}", path.display(), why),
    };

    if path.extension() == Some(std::ffi::OsStr::new("gz")) {
        Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    }
}

/// Open `output` for buffered writing, `"stdout"` selecting standard
/// output. Buffered content reaches the sink when the writer drops.
pub fn writer(output: &str) -> Box<dyn Write> {
    if output == "stdout" {
        return Box::new(BufWriter::new(std::io::stdout()));
    }

    match std::fs::File::create(output) {
        Ok(file) => Box::new(BufWriter::new(file)),
        Err(why) => panic!("could not create {}: {}", output, why),
    }
}
