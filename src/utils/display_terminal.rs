//! 터미널 출력 포맷팅 유틸리티
//!
//! 부트스트랩 과정에서 사용되는 터미널 출력 함수들을 제공합니다.
//! 박스 형태의 제목, 진행 단계 표시, 완료 요약 등을 시각적으로 표현합니다.

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// Output:
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║           🔄 BOOTSTRAPPING MODULE REGISTRY        ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    // 고정 너비 50칸 사용 (박스 내부 콘텐츠)
    let content_width = 50;
    let border = "═".repeat(content_width);

    println!("╔{}╗", border);
    println!("║{:^49}║", title);
    println!("╚{}╝", border);
}

/// 진행 단계 시작을 표시합니다
///
/// ```text
/// → Step 1: Registering built-in modules
/// ```
pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

/// 진행 단계 완료를 표시합니다
///
/// ```text
/// ✓ Step 1: Modules registered (7 items)
/// ```
pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

/// 서브 작업의 상태를 표시합니다
///
/// ```text
///    ├─ payroll: ✓ Loaded
///    ├─ ach: ✗ Failed
/// ```
pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 부트스트랩 완료 요약을 출력합니다
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║          🎉 MODULE REGISTRY INITIALIZED           ║
/// ╚══════════════════════════════════════════════════╝
///    📦 Loaded: 6
///    ❌ Failed: 1
///    🔐 Access granted: 6
/// ```
pub fn print_final_summary(loaded: usize, failed: usize, granted: usize) {
    println!();
    print_boxed_title("🎉 MODULE REGISTRY INITIALIZED");
    println!("   📦 Loaded: {}", loaded);
    println!("   ❌ Failed: {}", failed);
    println!("   🔐 Access granted: {}", granted);
    println!();
}
