use studyblock_core::tips;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    for category in tips::categories() {
        println!("{} {}", category.emoji, category.title);
        for tip in category.tips {
            println!("  - {tip}");
        }
        println!();
    }
    Ok(())
}
