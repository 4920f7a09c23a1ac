fn main() {
    uniffi::generate_scaffolding("src/docklink.udl").expect("UDL scaffolding generation failed");
}
