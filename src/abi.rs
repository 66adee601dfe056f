use alloy_sol_types::sol;

sol! {
    /// Minimal ERC-20 surface used for custody, approvals and settlement
    #[sol(all_derives)]
    interface IERC20 {
        event Transfer(address indexed from, address indexed to, uint256 value);
        event Approval(address indexed owner, address indexed spender, uint256 value);

        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        function transfer(address to, uint256 amount) external returns (bool);
        function transferFrom(address from, address to, uint256 amount) external returns (bool);
    }

    /// Swap executor entry points and audit events
    #[sol(all_derives)]
    interface ISwapExecutor {
        struct Call3 {
            address target;
            bool allowFailure;
            bytes callData;
        }

        event MultiCallExecuted(address indexed caller, uint256 callCount, bool success);
        event SwapExecuted(
            address indexed srcToken,
            address indexed destToken,
            uint256 srcAmount,
            uint256 destAmount,
            address indexed user
        );

        function executeSwap(
            address srcToken,
            address destToken,
            uint256 srcAmount,
            uint256 minDestAmount,
            Call3[] calldata calls
        ) external returns (uint256 destAmount);

        function encodeApproval(address token, address spender, uint256 amount) external pure returns (bytes memory);
    }

    /// Fixed-rate router used by the mock contracts
    #[sol(all_derives)]
    interface IMockRouter {
        function swap(address srcToken, address destToken, uint256 amountIn, address recipient) external returns (uint256 amountOut);
    }
}
