use shadow_rs::ShadowBuilder;

fn main() {
    // Build metadata for `dingtalk-bot --version`
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
