//! Usage text for the `zxpack` binary.

/// Prints the usage summary to stdout. Shown when the tool is invoked with
/// no arguments; that invocation exits 0.
pub fn print_usage() {
    println!("Usage: zxpack [format] [options...] <inputFile> [outputFile]");
    println!();
    println!("Formats:");
    println!("  -lzm   Byte-aligned LZSS, raw 7-bit lengths (default).");
    println!("  -ef8   Elias-gamma lengths, 8-bit offset.");
    println!("  -e1    Alias for -ef8.");
    println!("  -e1zx  Like -ef8, bit stream negated for carry-driven Z80 decoders.");
    println!("  -bx0   Elias-gamma lengths, 14-bit split offset, repeat offset.");
    println!("  -bx2   Elias-gamma lengths, 8-bit offset, repeat offset.");
    println!();
    println!("Options:");
    println!("  -r     Compress in reverse order.");
    println!("  -e     Append the end-of-stream marker.");
    println!("  -o     Extend the maximum window offset by 1.");
    println!("  -l     Extend the maximum block length by 1.");
}
