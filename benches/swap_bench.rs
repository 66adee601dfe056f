use alloy_primitives::{Address, U256};
use criterion::{Criterion, criterion_group, criterion_main};
use lazy_static::lazy_static;
use std::sync::Arc;
use swap_executor::{
    CallSpec, ExecutorConfig, IMockRouter, MockRouter, SwapExecutor, SwapRequest, Token, USDC, WETH, World,
    approval_call,
};

const ROUTER: Address = Address::repeat_byte(0x20);
const EXECUTOR: Address = Address::repeat_byte(0xe0);
const USER: Address = Address::repeat_byte(0x11);

lazy_static! {
    static ref WETH_TOKEN: Token = Token::weth();
    static ref USDC_TOKEN: Token = Token::new_with_data(USDC, Some("USDC".to_string()), None, Some(6));
}

fn setup(hops: usize) -> (World, Arc<SwapExecutor>, SwapRequest) {
    let mut world = World::from_config(&ExecutorConfig::default());
    world.deploy_token(WETH);
    world.deploy_token(USDC);
    world.deploy(ROUTER, Arc::new(MockRouter::new(2_500_000_000, 1_000_000_000_000_000_000)));
    let executor = SwapExecutor::new(EXECUTOR).deploy(&mut world);

    let amount = WETH_TOKEN.from_float(1.0);
    world.mint(WETH, USER, amount);
    world.mint(USDC, ROUTER, USDC_TOKEN.from_float(1_000_000.0));
    world.set_allowance(WETH, USER, EXECUTOR, amount);
    world.finalize();

    // split the input over several router calls
    let part = amount / U256::from(hops);
    let mut calls = vec![approval_call(WETH, ROUTER, amount)];
    for _ in 0..hops {
        let swap = IMockRouter::swapCall { srcToken: WETH, destToken: USDC, amountIn: part, recipient: EXECUTOR };
        calls.push(CallSpec::required(ROUTER, MockRouter::encode_swap(swap)));
    }
    let request = SwapRequest::new(WETH, USDC, amount, USDC_TOKEN.from_float(1_000.0), calls);
    (world, executor, request)
}

fn run_swap(hops: usize) -> eyre::Result<()> {
    let (mut world, executor, request) = setup(hops);
    executor.execute_swap(&mut world, USER, request)?;
    Ok(())
}

fn benchmark_swap_group(c: &mut Criterion) {
    let mut group = c.benchmark_group("swap");
    group.sample_size(50);

    group.bench_function("execute_swap_single_route", |b| b.iter(|| run_swap(1)));
    group.bench_function("execute_swap_split_route_16", |b| b.iter(|| run_swap(16)));
    group.finish();
}

criterion_group!(benches, benchmark_swap_group);
criterion_main!(benches);
