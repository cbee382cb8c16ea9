pub mod argparse;
pub mod hex;
